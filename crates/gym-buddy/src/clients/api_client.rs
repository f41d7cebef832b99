//! # ApiClient Trait
//!
//! A common interface for the per-collection clients: default `get`, `list` and `delete`
//! built on the generic [`ResourceClient`], plus the hand-off to a page as a
//! [`Transport`].
use async_trait::async_trait;
use resource_sync::{ResourceClient, SyncEntity, Transport, TransportError};
use std::rc::Rc;

/// Trait for collection-specific clients to inherit the standard operations.
///
/// ```rust,ignore
/// #[derive(Clone)]
/// pub struct UserClient {
///     inner: ResourceClient<User>,
/// }
///
/// impl ApiClient<User> for UserClient {
///     type Error = UserError;
///
///     fn inner(&self) -> &ResourceClient<User> {
///         &self.inner
///     }
/// }
///
/// // get(), list() and delete() are provided.
/// let alice = client.get(UserId(1)).await?;
/// ```
#[async_trait]
pub trait ApiClient<T: SyncEntity>: Send + Sync {
    /// The collection-specific error type.
    type Error: From<TransportError> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// The client as a page sees it.
    fn transport(&self) -> Rc<dyn Transport<T>> {
        Rc::new(self.inner().clone())
    }

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        Ok(self.inner().get(id).await?)
    }

    /// Fetch the whole collection.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        Ok(self.inner().list().await?)
    }

    /// Delete a record by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        Ok(self.inner().delete(id).await?)
    }
}
