//! # Resource Sync
//!
//! The reactive resource/form synchronization core behind every CRUD page: fetch a
//! collection into a tri-state view, derive what the page renders from it, validate the
//! page's form, and keep the list consistent after create/update/delete.
//!
//! ## Architecture Overview
//!
//! The crate separates concerns into four layers:
//!
//! 1. **Transport Layer** ([`Transport`], [`ResourceClient`], [`ResourceActor`]) - Moving
//!    records. A page only sees `dyn Transport<T>`; the in-memory backend actor and the
//!    [`mock`] module both sit behind it.
//! 2. **Resource Layer** ([`Resource`]) - One asynchronous list fetch as
//!    `Idle/Loading/Success/Error`, with generation-counter supersession.
//! 3. **Derived Layer** ([`reactive`], [`derive`]) - Observable cells and memoized
//!    computed values; the explicit state-to-view dispatch [`ListView`].
//! 4. **Interaction Layer** ([`form`], [`MutationCoordinator`]) - Field validation,
//!    the submission gate, and the mutation state machine.
//!
//! ## Scheduling Model
//!
//! Everything above the transport is single-threaded: state lives in `Rc`/`RefCell`,
//! continuations are spawned with `tokio::task::spawn_local`. Run pages inside a
//! [`tokio::task::LocalSet`] on a current-thread runtime:
//!
//! ```rust,ignore
//! let local = tokio::task::LocalSet::new();
//! local.run_until(async {
//!     let users = Resource::new(Vec::new());
//!     users.bind(Rc::new(user_client));
//!     users.reload();
//!     users.settled().await;
//!     match derive::dispatch(&users.snapshot()) {
//!         ListView::Loading => println!("Loading users..."),
//!         ListView::Failed(_) => println!("Could not load users. Please try again."),
//!         ListView::Empty => println!("No users yet. Create one to get started!"),
//!         ListView::Ready(list) => println!("{} users", list.len()),
//!         ListView::Idle => {}
//!     }
//! }).await;
//! ```
//!
//! The backend actor is the exception: it is `Send` and runs on `tokio::spawn`, talking to
//! the pages over channels only.
//!
//! ## Consistency Rules
//!
//! - Only the result of the most recently issued reload is ever applied.
//! - A failed load resets the value to the default; it never keeps stale data.
//! - Mutations never patch a list. Success means "reload, then close the form".
//!
//! ## Testing
//!
//! See [`mock`] for scripted transports, manual responders and a scripted confirmation.

pub mod actor;
pub mod client;
pub mod derive;
pub mod entity;
pub mod error;
pub mod form;
pub mod message;
pub mod mock;
pub mod mutation;
pub mod reactive;
pub mod resource;
pub mod transport;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use derive::{dispatch, ListSignals, ListView};
pub use entity::SyncEntity;
pub use error::{LoadError, MutationError, MutationKind, TransportError};
pub use form::{Form, FormEntity, FormModel, FormSchema};
pub use message::{RequestKind, ResourceRequest, Response};
pub use mutation::{Confirm, MutationCoordinator, Outcome, Phase, Submit};
pub use reactive::{Computed, Observable};
pub use resource::{Resource, ResourceOptions, ResourceState, Settlement, Status};
pub use transport::Transport;
