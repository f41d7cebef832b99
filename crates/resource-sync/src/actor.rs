//! # In-Memory Backend Actor
//!
//! This module defines the `ResourceActor`, an in-memory stand-in for the REST backend. It
//! owns one collection of records and answers [`ResourceRequest`]s sequentially, which is
//! what lets the pages run end-to-end without a server.

use crate::client::ResourceClient;
use crate::entity::SyncEntity;
use crate::error::TransportError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// ## ResourceActor
///
/// The `ResourceActor<T>` is the *server* side of a [`ResourceClient<T>`]. It owns the store
/// for one record type and processes every request in order, so the store needs no lock.
///
/// * **Ordering** – records are kept in id order, which is also the order `List` returns.
/// * **Ids** – assigned sequentially from 1.
/// * **Context injection** – a `Context` is handed to every lifecycle hook when the actor
///   starts running, so dependencies can be wired after construction.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<User>::new(32);
/// tokio::spawn(actor.run(()));
/// let alice = client.create(UserCreate { .. }).await?;
/// ```
///
/// ## Operations
///
/// * **List**: clones every stored record.
/// * **Get**: clones one record, or `None`.
/// * **Create**: assigns the next id, builds the record with `from_create`, runs
///   `on_create`, stores it and returns it.
/// * **Update**: runs `on_update` on the stored record and returns the new state.
/// * **Delete**: runs `on_delete`, then removes the record.
///
/// Hook failures come back as [`TransportError::Rejected`]; unknown ids as
/// [`TransportError::NotFound`].
pub struct ResourceActor<T: SyncEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: SyncEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the request channel. If the channel is full,
    ///   client calls wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name (e.g. "User" instead of "gym_buddy::model::user::User")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Backend started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self.store.values().cloned().collect();
                    debug!(entity_type, size = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    let mut item = match T::from_create(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create rejected");
                            let _ = respond_to.send(Err(TransportError::Rejected(e.to_string())));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(TransportError::Rejected(e.to_string())));
                        continue;
                    }
                    self.next_id += 1;
                    self.store.insert(id.clone(), item.clone());
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(TransportError::NotFound(id.to_string())));
                        continue;
                    };
                    // Apply to a copy so a failed hook leaves the stored record untouched.
                    let mut updated = item.clone();
                    if let Err(e) = updated.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update rejected");
                        let _ = respond_to.send(Err(TransportError::Rejected(e.to_string())));
                        continue;
                    }
                    *item = updated.clone();
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(updated));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(TransportError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(TransportError::Rejected(e.to_string())));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
