//! # Transport Trait
//!
//! The seam between the synchronization core and whatever actually moves records. The
//! resource controller and the mutation coordinator only ever see a `dyn Transport<T>`,
//! so a page can be driven by the in-memory backend, a scripted mock, or a real HTTP
//! client without changing.
//!
//! Every call must settle exactly once (success or failure) and must never be dropped
//! silently.

use crate::client::ResourceClient;
use crate::entity::SyncEntity;
use crate::error::TransportError;
use async_trait::async_trait;

#[async_trait]
pub trait Transport<T: SyncEntity>: Send + Sync {
    /// Fetch the whole collection.
    async fn list(&self) -> Result<Vec<T>, TransportError>;

    /// Create a record and return it as stored.
    async fn create(&self, params: T::Create) -> Result<T, TransportError>;

    /// Apply a partial update and return the record as stored.
    async fn update(&self, id: T::Id, update: T::Update) -> Result<T, TransportError>;

    /// Remove a record.
    async fn delete(&self, id: T::Id) -> Result<(), TransportError>;
}

#[async_trait]
impl<T: SyncEntity> Transport<T> for ResourceClient<T> {
    async fn list(&self) -> Result<Vec<T>, TransportError> {
        ResourceClient::list(self).await
    }

    async fn create(&self, params: T::Create) -> Result<T, TransportError> {
        ResourceClient::create(self, params).await
    }

    async fn update(&self, id: T::Id, update: T::Update) -> Result<T, TransportError> {
        ResourceClient::update(self, id, update).await
    }

    async fn delete(&self, id: T::Id) -> Result<(), TransportError> {
        ResourceClient::delete(self, id).await
    }
}
