//! # Generic Messages
//!
//! This module defines the request type carried between a [`ResourceClient`](crate::ResourceClient)
//! and whatever answers it (the in-memory [`ResourceActor`](crate::ResourceActor) or a
//! [`MockClient`](crate::mock::MockClient)).

use crate::entity::SyncEntity;
use crate::error::TransportError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel. Exactly one settlement per request.
pub type Response<T> = oneshot::Sender<Result<T, TransportError>>;

/// A request against one collection of records.
///
/// The variants follow the REST surface of the backend: list the collection, fetch one
/// record, create, partially update, delete.
#[derive(Debug)]
pub enum ResourceRequest<T: SyncEntity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

impl<T: SyncEntity> ResourceRequest<T> {
    /// The kind of request, without its payload.
    pub fn kind(&self) -> RequestKind {
        match self {
            ResourceRequest::List { .. } => RequestKind::List,
            ResourceRequest::Get { .. } => RequestKind::Get,
            ResourceRequest::Create { .. } => RequestKind::Create,
            ResourceRequest::Update { .. } => RequestKind::Update,
            ResourceRequest::Delete { .. } => RequestKind::Delete,
        }
    }

    /// Settles the request with an error, whatever its kind.
    pub fn fail(self, error: TransportError) {
        let _ = match self {
            ResourceRequest::List { respond_to } => respond_to.send(Err(error)).map_err(drop),
            ResourceRequest::Get { respond_to, .. } => respond_to.send(Err(error)).map_err(drop),
            ResourceRequest::Create { respond_to, .. } => {
                respond_to.send(Err(error)).map_err(drop)
            }
            ResourceRequest::Update { respond_to, .. } => {
                respond_to.send(Err(error)).map_err(drop)
            }
            ResourceRequest::Delete { respond_to, .. } => {
                respond_to.send(Err(error)).map_err(drop)
            }
        };
    }
}

/// Payload-free tag of a [`ResourceRequest`], used for counting calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    List,
    Get,
    Create,
    Update,
    Delete,
}
