//! # Workout Actor
//!
//! The in-memory backend for workout records. A workout belongs to a user, so this actor
//! runs with a [`UserClient`] as its context and checks the owner on every create:
//!
//! ```rust,ignore
//! let (user_actor, user_client) = user_actor::new(32);
//! let (workout_actor, workout_client) = workout_actor::new(32);
//!
//! tokio::spawn(user_actor.run(()));
//! tokio::spawn(workout_actor.run(user_client.clone()));
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::WorkoutClient;
use crate::model::Workout;
use resource_sync::ResourceActor;

/// Creates a new Workout actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Workout>, WorkoutClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, WorkoutClient::new(generic_client))
}
