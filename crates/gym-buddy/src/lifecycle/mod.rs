//! # System Lifecycle
//!
//! Starting, wiring and stopping the in-memory backends, plus the tracing setup.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without their dependencies and receive them in `run(context)`.
//! The workout backend needs to look users up, so it runs with a [`UserClient`]:
//!
//! ```rust,ignore
//! let (user_actor, user_client) = user_actor::new(buffer);
//! let (workout_actor, workout_client) = workout_actor::new(buffer);
//!
//! tokio::spawn(user_actor.run(()));
//! tokio::spawn(workout_actor.run(user_client.clone()));
//! ```
//!
//! ## Shutdown
//!
//! An actor stops once every client of its channel is gone. The workout actor holds a
//! user client, so the user actor stops after it. Pages hold transports too: drop them
//! before calling [`GymSystem::shutdown`].
//!
//! [`UserClient`]: crate::clients::UserClient

pub mod system;
pub mod tracing;

pub use system::GymSystem;
