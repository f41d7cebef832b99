//! # Gym Buddy
//!
//! The Gym Buddy app on top of [`resource_sync`]: users and their workouts.
//!
//! - **[model]**: `User` and `Workout` records and their create/update payloads.
//! - **[user_actor]**, **[workout_actor]**: in-memory backends with the same rules the
//!   REST API enforces.
//! - **[clients]**: typed wrappers around the backend channels.
//! - **[pages]**: the Users, Workouts and Dashboard page controllers.
//! - **[view]**: text rendering of page state.
//! - **[config]**, **[lifecycle]**: environment settings, startup and shutdown.

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod pages;
pub mod user_actor;
pub mod view;
pub mod workout_actor;
