//! Error types for the Workout actor.

use crate::model::{UserId, WorkoutId};
use resource_sync::TransportError;
use thiserror::Error;

/// Errors that can occur during workout operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorkoutError {
    #[error("Workout name cannot be empty")]
    EmptyName,

    #[error("User ID must be valid")]
    InvalidUser,

    /// The owner does not exist in the user backend.
    #[error("User not found: {0}")]
    UnknownUser(UserId),

    #[error("Workout not found: {0}")]
    NotFound(WorkoutId),

    #[error("Workout backend error: {0}")]
    Communication(String),
}

impl From<TransportError> for WorkoutError {
    fn from(e: TransportError) -> Self {
        WorkoutError::Communication(e.to_string())
    }
}
