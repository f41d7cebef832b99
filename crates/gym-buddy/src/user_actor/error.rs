//! Error types for the User actor.

use crate::model::UserId;
use resource_sync::TransportError;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email must be valid")]
    InvalidEmail,

    #[error("User not found: {0}")]
    NotFound(UserId),

    /// The backend could not be reached, or it refused the request.
    #[error("User backend error: {0}")]
    Communication(String),
}

impl From<TransportError> for UserError {
    fn from(e: TransportError) -> Self {
        UserError::Communication(e.to_string())
    }
}
