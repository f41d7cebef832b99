//! # Errors
//!
//! This module defines the error types used throughout the synchronization core.
//! By centralizing error definitions, every page sees the same taxonomy:
//!
//! - [`TransportError`]: what the backend channel reports for a single request.
//! - [`LoadError`]: a failed list fetch, absorbed into a resource's `Error` status.
//! - [`MutationError`]: a failed create/update/delete, handed to the error handler.
//!
//! Validation errors live next to the validators in [`crate::form`]; they are read,
//! never returned as `Err`.
//!
//! All of these are `Clone + PartialEq` so they can be stored inside observable state
//! and compared in tests.

use std::fmt;
use std::time::Duration;

/// Errors reported by the transport for one request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Backend closed")]
    Closed,
    #[error("Backend dropped response channel")]
    Dropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The backend refused the payload (domain validation).
    #[error("Rejected by backend: {0}")]
    Rejected(String),
    #[error("Transport failure: {0}")]
    Failure(String),
}

/// A list fetch that did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("Load failed: {0}")]
    Transport(#[from] TransportError),
    #[error("Load timed out after {0:?}")]
    Timeout(Duration),
}

/// The three mutation intents a page can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// A create/update/delete that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    #[error("{kind} failed: {source}")]
    Transport {
        kind: MutationKind,
        source: TransportError,
    },
    /// The form passed validation but could not be turned into a payload.
    #[error("{kind} payload invalid: {message}")]
    InvalidPayload { kind: MutationKind, message: String },
}

impl MutationError {
    pub fn kind(&self) -> MutationKind {
        match self {
            MutationError::Transport { kind, .. } | MutationError::InvalidPayload { kind, .. } => {
                *kind
            }
        }
    }
}
