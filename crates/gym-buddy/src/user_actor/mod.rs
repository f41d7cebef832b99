//! # User Actor
//!
//! The in-memory backend for user records.
//!
//! ## Structure
//!
//! - [`entity`] - [`SyncEntity`](resource_sync::SyncEntity) implementation for [`User`]
//! - [`error`] - [`UserError`], the rules a user record has to satisfy
//! - [`new()`] - Factory function that creates the actor and its client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, client) = user_actor::new(32);
//! tokio::spawn(actor.run(()));
//!
//! let alice = client
//!     .create_user(UserCreate {
//!         username: "alice".to_string(),
//!         email: "alice@example.com".to_string(),
//!     })
//!     .await?;
//! ```
//!
//! Users have no dependencies, so the context is `()`.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use resource_sync::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, UserClient::new(generic_client))
}
