//! Type-safe wrappers around [`ResourceClient`](resource_sync::ResourceClient).

pub mod api_client;
pub mod user_client;
pub mod workout_client;

pub use api_client::*;
pub use user_client::*;
pub use workout_client::*;
