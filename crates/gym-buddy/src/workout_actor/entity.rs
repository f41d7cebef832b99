//! [`SyncEntity`] implementation for [`Workout`].

use super::WorkoutError;
use crate::clients::{ApiClient, UserClient};
use crate::model::{Workout, WorkoutCreate, WorkoutId, WorkoutUpdate};
use async_trait::async_trait;
use resource_sync::SyncEntity;
use tracing::debug;

impl Workout {
    /// Checks the rules a stored workout must satisfy.
    pub fn validate(&self) -> Result<(), WorkoutError> {
        if self.name.trim().is_empty() {
            return Err(WorkoutError::EmptyName);
        }
        if self.user_id.0 == 0 {
            return Err(WorkoutError::InvalidUser);
        }
        Ok(())
    }
}

#[async_trait]
impl SyncEntity for Workout {
    type Id = WorkoutId;
    type Create = WorkoutCreate;
    type Update = WorkoutUpdate;
    type Context = UserClient;
    type Error = WorkoutError;

    fn id(&self) -> Option<WorkoutId> {
        self.id
    }

    /// New workouts start without exercises.
    fn from_create(id: WorkoutId, params: WorkoutCreate) -> Result<Self, WorkoutError> {
        let workout = Self {
            id: Some(id),
            user_id: params.user_id,
            name: params.name,
            description: params.description,
            duration_minutes: params.duration_minutes,
            exercise_count: Some(0),
        };
        workout.validate()?;
        Ok(workout)
    }

    /// Refuses workouts for users the user backend does not know.
    async fn on_create(&mut self, users: &UserClient) -> Result<(), WorkoutError> {
        debug!(user_id = %self.user_id, "Checking workout owner");
        match users.get(self.user_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(WorkoutError::UnknownUser(self.user_id)),
            Err(e) => Err(WorkoutError::Communication(e.to_string())),
        }
    }

    async fn on_update(
        &mut self,
        update: WorkoutUpdate,
        _users: &UserClient,
    ) -> Result<(), WorkoutError> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(minutes) = update.duration_minutes {
            self.duration_minutes = Some(minutes);
        }
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;

    fn create(user: u64, name: &str) -> WorkoutCreate {
        WorkoutCreate {
            user_id: UserId(user),
            name: name.to_string(),
            description: None,
            duration_minutes: Some(30),
        }
    }

    #[test]
    fn new_workouts_have_no_exercises() {
        let workout = Workout::from_create(WorkoutId(1), create(2, "Push")).unwrap();
        assert_eq!(workout.exercise_count, Some(0));
        assert_eq!(workout.duration_minutes, Some(30));
    }

    #[test]
    fn create_rejects_missing_name_or_owner() {
        assert_eq!(
            Workout::from_create(WorkoutId(1), create(2, " ")),
            Err(WorkoutError::EmptyName)
        );
        assert_eq!(
            Workout::from_create(WorkoutId(1), create(0, "Push")),
            Err(WorkoutError::InvalidUser)
        );
    }
}
