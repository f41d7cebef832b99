//! # Mock Framework & Testing Guide
//!
//! The `MockClient<T>` type answers the same [`ResourceRequest`]s as the in-memory backend,
//! but from a queue of scripted expectations. It lets page tests decide exactly what the
//! backend says (and when), without running a [`ResourceActor`](crate::ResourceActor).
//!
//! ## When to use Mocks vs the Real Backend
//!
//! | Feature | MockClient | ResourceActor |
//! |---------|------------|---------------|
//! | **State** | None (scripted replies) | Real store, real ids |
//! | **Error Injection** | Easy (`return_err`) | Needs a payload the entity rejects |
//! | **Timing** | `with_delay`, or manual responders | Immediate |
//! | **Use Case** | Page/coordinator logic | Entity hooks, end-to-end flows |
//!
//! ## Testing Strategies
//!
//! <details>
//! <summary><b>Pattern 0: Scripted replies (MockClient)</b></summary>
//!
//! ```rust,ignore
//! let mut mock = MockClient::<User>::new();
//! mock.expect_create().return_ok(alice.clone());
//! mock.expect_list().return_ok(vec![alice]);
//!
//! let page = UsersPage::new(mock.transport());
//! // ... drive the page ...
//! assert_eq!(mock.request_count(RequestKind::List), 1);
//! mock.verify();
//! ```
//! </details>
//!
//! <details>
//! <summary><b>Pattern 1: Manual responders (settlement order under test control)</b></summary>
//!
//! ```rust,ignore
//! let (client, mut receiver) = create_mock_client::<User>(10);
//! resource.bind(Rc::new(client));
//! resource.reload();
//! resource.reload();
//! let slow = expect_list(&mut receiver).await.unwrap();
//! let fast = expect_list(&mut receiver).await.unwrap();
//! fast.send(Ok(vec![bob])).unwrap();
//! slow.send(Ok(vec![alice])).unwrap();
//! ```
//! </details>
//!
//! <details>
//! <summary><b>Pattern 2: Full system (real backend actors)</b></summary>
//!
//! See `tests/integration_test.rs` in the `gym-buddy` crate.
//! </details>
//!
//! ## Confirmation prompts
//!
//! [`ScriptedConfirm`] answers delete confirmations from a list and records the prompts.

use crate::client::ResourceClient;
use crate::entity::SyncEntity;
use crate::error::TransportError;
use crate::message::{RequestKind, ResourceRequest, Response};
use crate::mutation::Confirm;
use crate::transport::Transport;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer, optionally delivered late.
struct Reply<R> {
    response: Result<R, TransportError>,
    delay: Option<Duration>,
}

/// Represents an expected request to the mock client.
enum Expectation<T: SyncEntity> {
    List(Reply<Vec<T>>),
    Get(Reply<Option<T>>),
    Create(Reply<T>),
    Update(Reply<T>),
    Delete(Reply<()>),
}

impl<T: SyncEntity> Expectation<T> {
    fn kind(&self) -> RequestKind {
        match self {
            Expectation::List(_) => RequestKind::List,
            Expectation::Get(_) => RequestKind::Get,
            Expectation::Create(_) => RequestKind::Create,
            Expectation::Update(_) => RequestKind::Update,
            Expectation::Delete(_) => RequestKind::Delete,
        }
    }
}

#[derive(Default)]
struct Log {
    received: Vec<RequestKind>,
    unexpected: Vec<String>,
}

fn deliver<R: Send + 'static>(respond_to: Response<R>, reply: Reply<R>) {
    match reply.delay {
        Some(delay) => {
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = respond_to.send(reply.response);
            });
        }
        None => {
            let _ = respond_to.send(reply.response);
        }
    }
}

/// A mock backend with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the next
/// expectation is answered with [`TransportError::Failure`] and makes
/// [`verify`](Self::verify) panic.
pub struct MockClient<T: SyncEntity> {
    client: ResourceClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    log: Arc<Mutex<Log>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: SyncEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SyncEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Arc<Mutex<VecDeque<Expectation<T>>>> = Arc::default();
        let log: Arc<Mutex<Log>> = Arc::default();
        let expectations_clone = expectations.clone();
        let log_clone = log.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let kind = request.kind();
                log_clone.lock().unwrap().received.push(kind);
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::List { respond_to }, Some(Expectation::List(reply))) => {
                        deliver(respond_to, reply)
                    }
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get(reply))) => {
                        deliver(respond_to, reply)
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create(reply)),
                    ) => deliver(respond_to, reply),
                    (
                        ResourceRequest::Update { respond_to, .. },
                        Some(Expectation::Update(reply)),
                    ) => deliver(respond_to, reply),
                    (
                        ResourceRequest::Delete { respond_to, .. },
                        Some(Expectation::Delete(reply)),
                    ) => deliver(respond_to, reply),
                    (request, expectation) => {
                        let expected = expectation.as_ref().map(Expectation::kind);
                        log_clone
                            .lock()
                            .unwrap()
                            .unexpected
                            .push(format!("got {kind:?}, expected {expected:?}"));
                        if let Some(expectation) = expectation {
                            expectations_clone.lock().unwrap().push_front(expectation);
                        }
                        request.fail(TransportError::Failure(format!(
                            "unexpected {kind:?} request"
                        )));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            log,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// The client as the transport a page or resource consumes.
    pub fn transport(&self) -> Rc<dyn Transport<T>> {
        Rc::new(self.client())
    }

    fn builder<R>(&mut self, wrap: fn(Reply<R>) -> Expectation<T>) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap,
            delay: None,
        }
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::List)
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Expectation::Get)
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Create)
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Update)
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self) -> ExpectationBuilder<T, ()> {
        self.builder(Expectation::Delete)
    }

    /// How many requests of `kind` have arrived so far.
    pub fn request_count(&self, kind: RequestKind) -> usize {
        self.log
            .lock()
            .unwrap()
            .received
            .iter()
            .filter(|k| **k == kind)
            .count()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let log = self.log.lock().unwrap();
        if !log.unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", log.unexpected);
        }
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for one expectation. `R` is what the request returns.
pub struct ExpectationBuilder<T: SyncEntity, R> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    wrap: fn(Reply<R>) -> Expectation<T>,
    delay: Option<Duration>,
}

impl<T: SyncEntity, R> ExpectationBuilder<T, R> {
    /// Answer only after `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, TransportError>) {
        let expectation = (self.wrap)(Reply {
            response,
            delay: self.delay,
        });
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// MANUAL RESPONDERS
// =============================================================================

/// Creates a client and the receiving end of its channel.
///
/// Tests pull requests off the receiver with the `expect_*` helpers below and answer
/// them whenever they like, which is how settlement *order* is put under test control.
pub fn create_mock_client<T: SyncEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: SyncEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: SyncEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: SyncEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: SyncEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

// =============================================================================
// CONFIRMATION
// =============================================================================

/// Answers confirmation prompts from a fixed script. Once the script runs out, every
/// further prompt is declined.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: RefCell<VecDeque<bool>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Every message the user was asked, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.answers.borrow_mut().pop_front().unwrap_or(false)
    }
}
