//! # Mutation Coordinator
//!
//! Issues create/update/delete requests for one page and keeps the page consistent
//! afterwards. The only consistency mechanism is a full reload of the list resource;
//! the coordinator never patches the list in place.
//!
//! ## State machine (per mutation kind)
//!
//! ```text
//! Idle --submit (valid) / delete (confirmed)--> Pending
//! Pending --success--> Idle   reload() issued, then the form is closed and reset
//! Pending --failure--> Idle   error reported and recorded; form and list untouched
//! ```
//!
//! A second command of a kind that is already pending is refused with [`Submit::Busy`].

use crate::error::{MutationError, MutationKind, TransportError};
use crate::form::{Form, FormEntity};
use crate::reactive::Observable;
use crate::resource::Resource;
use crate::transport::Transport;
use std::cell::RefCell;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tokio::task::{self, JoinHandle};
use tracing::{debug, error, info, warn};

/// The "are you sure?" capability. Closures implement it.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
}

/// The result of a mutation that was actually sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed(MutationError),
}

/// What happened when a command was given.
#[derive(Debug)]
pub enum Submit {
    /// The form failed the gate (or could not be turned into a payload). Nothing was sent.
    Invalid,
    /// The same kind of mutation is still pending. Nothing was sent.
    Busy,
    /// The user declined the confirmation. Nothing was sent.
    Declined,
    /// `submit_update()` with no record opened for editing.
    NoTarget,
    /// The request was sent; the handle resolves once it has settled and the follow-up
    /// (reload, form reset) has been issued.
    Issued(JoinHandle<Outcome>),
}

impl Submit {
    pub fn is_issued(&self) -> bool {
        matches!(self, Submit::Issued(_))
    }

    /// Wait for the outcome of an issued command. `None` if nothing was sent.
    pub async fn outcome(self) -> Option<Outcome> {
        match self {
            Submit::Issued(handle) => handle.await.ok(),
            _ => None,
        }
    }
}

type MutationFuture = Pin<Box<dyn Future<Output = Result<(), TransportError>>>>;
type ErrorHandler = Rc<dyn Fn(&MutationError)>;

/// ## MutationCoordinator
///
/// One per page. Owns the page's form, the "form open" flag and the pending set; shares
/// the list resource it invalidates and the transport it sends through.
///
/// Cloning shares all state; clones are how settlement continuations reach back.
pub struct MutationCoordinator<T: FormEntity> {
    transport: Rc<dyn Transport<T>>,
    resource: Resource<Vec<T>>,
    form: Form,
    confirm: Rc<dyn Confirm>,
    on_error: ErrorHandler,
    confirm_message: Rc<str>,
    open: Observable<bool>,
    editing: Rc<RefCell<Option<T::Id>>>,
    pending: Rc<RefCell<HashSet<MutationKind>>>,
    last_error: Observable<Option<MutationError>>,
}

impl<T: FormEntity> Clone for MutationCoordinator<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Rc::clone(&self.transport),
            resource: self.resource.clone(),
            form: self.form.clone(),
            confirm: Rc::clone(&self.confirm),
            on_error: Rc::clone(&self.on_error),
            confirm_message: Rc::clone(&self.confirm_message),
            open: self.open.clone(),
            editing: Rc::clone(&self.editing),
            pending: Rc::clone(&self.pending),
            last_error: self.last_error.clone(),
        }
    }
}

impl<T: FormEntity> MutationCoordinator<T> {
    /// A coordinator with an always-yes confirmation and a logging error handler.
    pub fn new(transport: Rc<dyn Transport<T>>, resource: Resource<Vec<T>>) -> Self {
        Self {
            transport,
            resource,
            form: Form::new(T::schema()),
            confirm: Rc::new(|_: &str| true),
            on_error: Rc::new(|e: &MutationError| error!(error = %e, "Mutation failed")),
            confirm_message: Rc::from("Are you sure?"),
            open: Observable::new(false),
            editing: Rc::new(RefCell::new(None)),
            pending: Rc::new(RefCell::new(HashSet::new())),
            last_error: Observable::new(None),
        }
    }

    pub fn with_confirm(mut self, confirm: Rc<dyn Confirm>) -> Self {
        self.confirm = confirm;
        self
    }

    /// Replace the default (log-only) failure handler.
    pub fn with_error_handler(mut self, handler: impl Fn(&MutationError) + 'static) -> Self {
        self.on_error = Rc::new(handler);
        self
    }

    pub fn with_confirm_message(mut self, message: &str) -> Self {
        self.confirm_message = Rc::from(message);
        self
    }

    // -------------------------------------------------------------------------
    // Form commands
    // -------------------------------------------------------------------------

    pub fn open_form(&self) {
        self.open.set(true);
    }

    /// Close the form, reset it to its defaults and forget any record being edited.
    pub fn cancel_form(&self) {
        self.open.set(false);
        self.form.reset();
        self.editing.borrow_mut().take();
    }

    /// Open the form pre-filled with `entity` for an update.
    pub fn open_edit(&self, entity: &T) {
        *self.editing.borrow_mut() = entity.id();
        self.form.load(entity.form_values());
        self.open.set(true);
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Send a create built from the form.
    pub fn submit_create(&self) -> Submit {
        let kind = MutationKind::Create;
        if let Some(refused) = self.gate(kind) {
            return refused;
        }
        let params = match T::create_params(&self.form.snapshot()) {
            Ok(params) => params,
            Err(message) => return self.payload_error(kind, message),
        };
        debug!(?params, "Submitting create");
        let transport = Rc::clone(&self.transport);
        self.issue(
            kind,
            Box::pin(async move { transport.create(params).await.map(drop) }),
        )
    }

    /// Send an update of the record opened with [`open_edit`](Self::open_edit).
    pub fn submit_update(&self) -> Submit {
        let kind = MutationKind::Update;
        let Some(id) = self.editing.borrow().clone() else {
            warn!("submit_update() with no record being edited");
            return Submit::NoTarget;
        };
        if let Some(refused) = self.gate(kind) {
            return refused;
        }
        let update = match T::update_params(&self.form.snapshot()) {
            Ok(update) => update,
            Err(message) => return self.payload_error(kind, message),
        };
        debug!(%id, ?update, "Submitting update");
        let transport = Rc::clone(&self.transport);
        self.issue(
            kind,
            Box::pin(async move { transport.update(id, update).await.map(drop) }),
        )
    }

    /// Delete a record after the user confirms.
    pub fn delete(&self, id: T::Id) -> Submit {
        let kind = MutationKind::Delete;
        if self.phase(kind) == Phase::Pending {
            debug!(%kind, "Refusing, already pending");
            return Submit::Busy;
        }
        if !self.confirm.confirm(&self.confirm_message) {
            debug!(%id, "Delete declined");
            return Submit::Declined;
        }
        debug!(%id, "Deleting");
        let transport = Rc::clone(&self.transport);
        self.issue(kind, Box::pin(async move { transport.delete(id).await }))
    }

    /// Busy and validity checks shared by create and update.
    fn gate(&self, kind: MutationKind) -> Option<Submit> {
        if self.phase(kind) == Phase::Pending {
            debug!(%kind, "Refusing, already pending");
            return Some(Submit::Busy);
        }
        if !self.form.can_submit() {
            debug!(%kind, "Form invalid; marking all fields touched");
            self.form.mark_all_touched();
            return Some(Submit::Invalid);
        }
        None
    }

    fn payload_error(&self, kind: MutationKind, message: String) -> Submit {
        self.form.mark_all_touched();
        self.report(MutationError::InvalidPayload { kind, message });
        Submit::Invalid
    }

    fn issue(&self, kind: MutationKind, request: MutationFuture) -> Submit {
        self.pending.borrow_mut().insert(kind);
        info!(%kind, resource = self.resource.name(), "Mutation issued");

        let this = self.clone();
        Submit::Issued(task::spawn_local(async move {
            let result = request.await;
            this.pending.borrow_mut().remove(&kind);
            match result {
                Ok(()) => {
                    info!(%kind, resource = this.resource.name(), "Mutation succeeded");
                    this.last_error.set(None);
                    // Reload first, then close: the list is already refreshing when the
                    // form disappears.
                    drop(this.resource.reload());
                    if kind != MutationKind::Delete {
                        this.cancel_form();
                    }
                    Outcome::Succeeded
                }
                Err(source) => {
                    let error = MutationError::Transport { kind, source };
                    warn!(%kind, error = %error, "Mutation failed; form left as is");
                    this.report(error.clone());
                    Outcome::Failed(error)
                }
            }
        }))
    }

    fn report(&self, error: MutationError) {
        (self.on_error)(&error);
        self.last_error.set(Some(error));
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn open_state(&self) -> &Observable<bool> {
        &self.open
    }

    pub fn editing(&self) -> Option<T::Id> {
        self.editing.borrow().clone()
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit()
    }

    pub fn phase(&self, kind: MutationKind) -> Phase {
        if self.pending.borrow().contains(&kind) {
            Phase::Pending
        } else {
            Phase::Idle
        }
    }

    pub fn last_error(&self) -> Option<MutationError> {
        self.last_error.get()
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn resource(&self) -> &Resource<Vec<T>> {
        &self.resource
    }
}
