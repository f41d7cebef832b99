//! # Resource Controller
//!
//! A [`Resource<T>`] wraps one asynchronous producer (usually "list the collection") and
//! exposes its progress as a tri-state value the view can read synchronously:
//! `Idle → Loading → Success | Error`.
//!
//! ## Supersession
//!
//! Every [`reload()`](Resource::reload) bumps a generation counter and captures it. When
//! the call settles, its captured generation is compared to the current one; if another
//! reload was issued in the meantime the result is discarded unobserved. Nothing is
//! aborted, the stale future simply runs to completion and is ignored.
//!
//! ## Errors
//!
//! Producer failures never reach the caller. They become `Status::Error`, the stored
//! [`LoadError`], and the value is reset to the configured default.

use crate::entity::SyncEntity;
use crate::error::LoadError;
use crate::reactive::Observable;
use crate::transport::Transport;
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Progress of the most recent load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Everything the view may read about a resource, as one consistent snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub status: Status,
    pub value: T,
    pub error: Option<LoadError>,
    pub generation: u64,
}

/// The future a producer returns. Local: it may hold `Rc`s.
pub type LoadFuture<T> = Pin<Box<dyn Future<Output = Result<T, LoadError>>>>;

/// An asynchronous fetch function, invoked once per reload.
pub type Producer<T> = Rc<dyn Fn() -> LoadFuture<T>>;

#[derive(Debug, Clone)]
pub struct ResourceOptions {
    /// Used in log fields only.
    pub name: String,
    /// Loads that take longer settle as [`LoadError::Timeout`].
    pub timeout: Option<Duration>,
}

impl Default for ResourceOptions {
    fn default() -> Self {
        Self {
            name: "resource".to_string(),
            timeout: None,
        }
    }
}

impl ResourceOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// How a reload ended, from the point of view of the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The result was applied.
    Accepted,
    /// A newer reload was issued first; the result was discarded.
    Superseded,
    /// `reload()` was called before `start()`.
    Unbound,
    /// The resource was dropped before the load finished.
    Dropped,
}

struct Shared<T> {
    state: Observable<ResourceState<T>>,
    default: T,
    producer: RefCell<Option<Producer<T>>>,
    options: ResourceOptions,
    settled: Notify,
}

impl<T: Clone + PartialEq + 'static> Shared<T> {
    fn settle(&self, generation: u64, result: Result<T, LoadError>) -> Settlement {
        let current = self.state.with(|s| s.generation);
        if generation != current {
            debug!(
                resource = %self.options.name,
                generation,
                current,
                "Discarding superseded load"
            );
            return Settlement::Superseded;
        }

        match result {
            Ok(value) => {
                info!(resource = %self.options.name, generation, "Load succeeded");
                self.state.update(|s| {
                    s.status = Status::Success;
                    s.value = value;
                    s.error = None;
                });
            }
            Err(error) => {
                warn!(resource = %self.options.name, generation, error = %error, "Load failed");
                let default = self.default.clone();
                self.state.update(|s| {
                    s.status = Status::Error;
                    s.value = default;
                    s.error = Some(error);
                });
            }
        }
        self.settled.notify_waiters();
        Settlement::Accepted
    }
}

/// ## Resource
///
/// A handle to one tri-state load. Cloning shares the same state.
///
/// ```rust,ignore
/// let users = Resource::new(Vec::new());
/// users.bind(transport);
/// users.reload();
/// users.settled().await;
/// assert_eq!(users.status(), Status::Success);
/// ```
pub struct Resource<T> {
    shared: Rc<Shared<T>>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("name", &self.shared.options.name)
            .field("state", &self.shared.state)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Resource<T> {
    /// A resource whose value starts as (and resets to) `default`.
    pub fn new(default: T) -> Self {
        Self::with_options(default, ResourceOptions::default())
    }

    pub fn with_options(default: T, options: ResourceOptions) -> Self {
        let state = Observable::new(ResourceState {
            status: Status::Idle,
            value: default.clone(),
            error: None,
            generation: 0,
        });
        Self {
            shared: Rc::new(Shared {
                state,
                default,
                producer: RefCell::new(None),
                options,
                settled: Notify::new(),
            }),
        }
    }

    /// Bind the producer. Does not invoke it.
    pub fn start(&self, producer: impl Fn() -> LoadFuture<T> + 'static) {
        *self.shared.producer.borrow_mut() = Some(Rc::new(producer));
    }

    /// Issue a new load and return immediately.
    ///
    /// The returned handle may be dropped; awaiting it tells whether this particular call
    /// was applied or superseded.
    ///
    /// # Panics
    ///
    /// Panics if called outside a [`tokio::task::LocalSet`].
    pub fn reload(&self) -> JoinHandle<Settlement> {
        let Some(producer) = self.shared.producer.borrow().clone() else {
            warn!(resource = %self.shared.options.name, "reload() before start(); ignoring");
            return task::spawn_local(async { Settlement::Unbound });
        };

        let mut generation = 0;
        self.shared.state.update(|s| {
            s.generation += 1;
            s.status = Status::Loading;
            s.error = None;
            generation = s.generation;
        });
        debug!(resource = %self.shared.options.name, generation, "Reload issued");

        let load = producer();
        let timeout = self.shared.options.timeout;
        let weak: Weak<Shared<T>> = Rc::downgrade(&self.shared);

        task::spawn_local(async move {
            let result = match timeout {
                Some(limit) => match tokio::time::timeout(limit, load).await {
                    Ok(result) => result,
                    Err(_) => Err(LoadError::Timeout(limit)),
                },
                None => load.await,
            };
            match weak.upgrade() {
                Some(shared) => shared.settle(generation, result),
                None => Settlement::Dropped,
            }
        })
    }

    /// Wait until no load is pending.
    pub async fn settled(&self) {
        loop {
            let notified = self.shared.settled.notified();
            if !self.is_loading() {
                return;
            }
            notified.await;
        }
    }

    pub fn status(&self) -> Status {
        self.shared.state.with(|s| s.status)
    }

    /// The last accepted value; the default after an error.
    pub fn value(&self) -> T {
        self.shared.state.with(|s| s.value.clone())
    }

    pub fn error(&self) -> Option<LoadError> {
        self.shared.state.with(|s| s.error.clone())
    }

    pub fn generation(&self) -> u64 {
        self.shared.state.with(|s| s.generation)
    }

    pub fn is_loading(&self) -> bool {
        self.status() == Status::Loading
    }

    /// All fields read under a single borrow.
    pub fn snapshot(&self) -> ResourceState<T> {
        self.shared.state.get()
    }

    /// The underlying cell, for building derived values.
    pub fn state(&self) -> &Observable<ResourceState<T>> {
        &self.shared.state
    }

    pub fn name(&self) -> &str {
        &self.shared.options.name
    }
}

impl<E: SyncEntity> Resource<Vec<E>> {
    /// Bind the resource to a transport's `list()`.
    pub fn bind(&self, transport: Rc<dyn Transport<E>>) {
        self.start(move || -> LoadFuture<Vec<E>> {
            let transport = Rc::clone(&transport);
            Box::pin(async move { transport.list().await.map_err(LoadError::from) })
        });
    }
}
