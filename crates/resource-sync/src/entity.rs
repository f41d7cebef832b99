//! # SyncEntity Trait
//!
//! The `SyncEntity` trait is the contract every record type (User, Workout, …) implements
//! so that the generic pieces of this crate can handle it: the backend actor stores it,
//! the transport moves it, and the resource/mutation layer lists and mutates it.
//!
//! # Architecture Note
//! Associated types pin the payloads to the entity. A `User` is created from a
//! `UserCreate` and you can't accidentally send it a `WorkoutCreate`; the compiler
//! rejects it.
//!
//! # Provided Methods (Hooks)
//! The backend calls these lifecycle hooks:
//! - [`SyncEntity::on_create`]
//! - [`SyncEntity::on_delete`]
//!
//! Both default to `Ok(())`. [`SyncEntity::on_update`] has no default because every
//! entity must say how a partial update is applied.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be listed, created, updated and deleted.
///
/// # Async & Context
/// The hooks are `#[async_trait]` so they can await other backends (e.g. a workout checks
/// that its user exists). The `Context` type is injected into every hook when the backend
/// actor starts running, not when it is constructed.
#[async_trait]
pub trait SyncEntity: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// The identifier assigned by the backend. Convertible from `u32` for sequential ids.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload for creating a new record.
    type Create: Clone + Send + Sync + Debug;

    /// Payload for a partial update.
    type Update: Clone + Send + Sync + Debug;

    /// Dependencies injected into the backend hooks. Use `()` if none.
    type Context: Send + Sync;

    /// Domain error raised by the hooks.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The id, once the backend has assigned one.
    fn id(&self) -> Option<Self::Id>;

    /// Builds the full record from its new id and the create payload.
    /// Called synchronously before `on_create`.
    fn from_create(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after the record is built and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies a partial update in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the record is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
