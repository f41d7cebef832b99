#![forbid(unsafe_code)]

//! Reactive cells for the view layer.
//!
//! - [`Observable`]: a shared, version-tracked value with change notification.
//! - [`Subscription`]: guard that unsubscribes on drop.
//! - [`Computed`]: a lazily evaluated, memoized value derived from observables.
//!
//! Everything here is `Rc<RefCell<..>>` based: single-threaded by construction. Writes
//! notify subscribers synchronously; computed values only mark themselves dirty and
//! recompute on the next read.

pub mod computed;
pub mod observable;

pub use computed::Computed;
pub use observable::{Observable, Subscription};
