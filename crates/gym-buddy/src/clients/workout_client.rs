//! # Workout Client
//!
//! Provides a high-level API for the `Workout` backend. The owner check happens in the
//! Workout actor's `on_create` hook, not here.
use crate::clients::ApiClient;
use crate::model::{Workout, WorkoutCreate, WorkoutId, WorkoutUpdate};
use crate::workout_actor::WorkoutError;
use async_trait::async_trait;
use resource_sync::{ResourceClient, TransportError};
use tracing::{debug, instrument};

/// Client for interacting with the Workout actor.
#[derive(Clone)]
pub struct WorkoutClient {
    inner: ResourceClient<Workout>,
}

impl WorkoutClient {
    pub fn new(inner: ResourceClient<Workout>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_workout(&self, params: WorkoutCreate) -> Result<Workout, WorkoutError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_workout(
        &self,
        id: WorkoutId,
        update: WorkoutUpdate,
    ) -> Result<Workout, WorkoutError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(|e| match e {
            TransportError::NotFound(_) => WorkoutError::NotFound(id),
            other => other.into(),
        })
    }
}

#[async_trait]
impl ApiClient<Workout> for WorkoutClient {
    type Error = WorkoutError;

    fn inner(&self) -> &ResourceClient<Workout> {
        &self.inner
    }
}
