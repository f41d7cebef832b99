//! # Page Controllers
//!
//! One controller per page of the app. Each owns its resources, derived signals and
//! mutation coordinator, and renders itself as text through [`crate::view`].
//!
//! Pages are single-threaded (`Rc` inside) and must be driven from a
//! [`tokio::task::LocalSet`]. They talk to the backend only through
//! [`Transport`](resource_sync::Transport), so tests can hand them a mock.

pub mod dashboard;
pub mod users;
pub mod workouts;

pub use dashboard::*;
pub use users::*;
pub use workouts::*;

/// The prompt shown before any delete.
pub const DELETE_CONFIRM: &str = "Are you sure?";
