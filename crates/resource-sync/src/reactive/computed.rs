//! Lazy computed values that re-derive from [`Observable`] sources.
//!
//! # Design
//!
//! A [`Computed<T>`] holds a compute function and its cached result. Each source it is
//! built from gets a subscription that only flips a dirty flag; nothing is recomputed
//! until the next [`get()`](Computed::get).
//!
//! # Invariants
//!
//! 1. `get()` never returns a value older than the last completed write to a source.
//! 2. The compute function runs at most once per invalidation (memoization).
//! 3. Multi-source constructors read all sources inside one call, so a single `get()`
//!    never mixes snapshots from different writes.
//! 4. `version` increments by exactly 1 per recomputation.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::observable::{Observable, Subscription};

struct Cached<T> {
    value: Option<T>,
    version: u64,
}

struct ComputedInner<T> {
    compute: Box<dyn Fn() -> T>,
    dirty: Cell<bool>,
    cached: RefCell<Cached<T>>,
    /// Never read; keeps the source callbacks alive for as long as this value lives.
    subscriptions: RefCell<Vec<Subscription>>,
}

/// A memoized value derived from one or more observables.
///
/// Cloning a `Computed` creates a new handle to the **same** cache.
pub struct Computed<T> {
    inner: Rc<ComputedInner<T>>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self.inner.cached.borrow();
        f.debug_struct("Computed")
            .field("cached", &cached.value)
            .field("dirty", &self.inner.dirty.get())
            .field("version", &cached.version)
            .finish()
    }
}

fn mark_dirty<T>(weak: &Weak<ComputedInner<T>>) {
    if let Some(inner) = weak.upgrade() {
        inner.dirty.set(true);
    }
}

impl<T: Clone + 'static> Computed<T> {
    fn with_compute(compute: Box<dyn Fn() -> T>) -> Self {
        Self {
            inner: Rc::new(ComputedInner {
                compute,
                dirty: Cell::new(true),
                cached: RefCell::new(Cached {
                    value: None,
                    version: 0,
                }),
                subscriptions: RefCell::new(Vec::new()),
            }),
        }
    }

    fn depend_on<S: Clone + PartialEq + 'static>(&self, source: &Observable<S>) {
        let weak = Rc::downgrade(&self.inner);
        let sub = source.subscribe(move |_| mark_dirty(&weak));
        self.inner.subscriptions.borrow_mut().push(sub);
    }

    /// Derive from a single observable.
    pub fn from_observable<S: Clone + PartialEq + 'static>(
        source: &Observable<S>,
        map: impl Fn(&S) -> T + 'static,
    ) -> Self {
        let s = source.clone();
        let computed = Self::with_compute(Box::new(move || s.with(|v| map(v))));
        computed.depend_on(source);
        computed
    }

    /// Derive from two observables.
    pub fn from2<S1, S2>(
        s1: &Observable<S1>,
        s2: &Observable<S2>,
        map: impl Fn(&S1, &S2) -> T + 'static,
    ) -> Self
    where
        S1: Clone + PartialEq + 'static,
        S2: Clone + PartialEq + 'static,
    {
        let (a, b) = (s1.clone(), s2.clone());
        let computed = Self::with_compute(Box::new(move || a.with(|va| b.with(|vb| map(va, vb)))));
        computed.depend_on(s1);
        computed.depend_on(s2);
        computed
    }

    /// Derive from three observables.
    pub fn from3<S1, S2, S3>(
        s1: &Observable<S1>,
        s2: &Observable<S2>,
        s3: &Observable<S3>,
        map: impl Fn(&S1, &S2, &S3) -> T + 'static,
    ) -> Self
    where
        S1: Clone + PartialEq + 'static,
        S2: Clone + PartialEq + 'static,
        S3: Clone + PartialEq + 'static,
    {
        let (a, b, c) = (s1.clone(), s2.clone(), s3.clone());
        let computed = Self::with_compute(Box::new(move || {
            a.with(|va| b.with(|vb| c.with(|vc| map(va, vb, vc))))
        }));
        computed.depend_on(s1);
        computed.depend_on(s2);
        computed.depend_on(s3);
        computed
    }

    /// Low-level constructor: the caller wires the subscriptions that should
    /// invalidate this value (typically through [`Computed::invalidate`]).
    pub fn from_fn(compute: impl Fn() -> T + 'static, subscriptions: Vec<Subscription>) -> Self {
        let computed = Self::with_compute(Box::new(compute));
        computed.inner.subscriptions.borrow_mut().extend(subscriptions);
        computed
    }

    /// Current value, recomputed first if any source changed.
    ///
    /// # Panics
    ///
    /// Panics if the compute function reads this same `Computed`.
    pub fn get(&self) -> T {
        let mut cached = self.inner.cached.borrow_mut();
        if let (false, Some(value)) = (self.inner.dirty.get(), cached.value.as_ref()) {
            return value.clone();
        }
        let value = (self.inner.compute)();
        self.inner.dirty.set(false);
        cached.version += 1;
        cached.value = Some(value.clone());
        value
    }

    /// Whether the next `get()` will recompute.
    pub fn is_dirty(&self) -> bool {
        self.inner.dirty.get()
    }

    /// Force the next `get()` to recompute.
    pub fn invalidate(&self) {
        self.inner.dirty.set(true);
    }

    /// Number of recomputations so far.
    pub fn version(&self) -> u64 {
        self.inner.cached.borrow().version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recomputes_only_after_a_source_changes() {
        let source = Observable::new(10);
        let runs = Rc::new(Cell::new(0));
        let runs_clone = Rc::clone(&runs);
        let doubled = Computed::from_observable(&source, move |v| {
            runs_clone.set(runs_clone.get() + 1);
            v * 2
        });

        assert_eq!(doubled.get(), 20);
        assert_eq!(doubled.get(), 20);
        assert_eq!(runs.get(), 1);

        source.set(5);
        assert!(doubled.is_dirty());
        assert_eq!(doubled.get(), 10);
        assert_eq!(runs.get(), 2);
        assert_eq!(doubled.version(), 2);
    }

    #[test]
    fn equal_write_keeps_the_cache() {
        let source = Observable::new(vec![1, 2, 3]);
        let len = Computed::from_observable(&source, |v| v.len());
        assert_eq!(len.get(), 3);

        source.set(vec![1, 2, 3]);
        assert!(!len.is_dirty());
        assert_eq!(len.version(), 1);
    }

    #[test]
    fn two_sources_are_read_together() {
        let users = Observable::new(2usize);
        let workouts = Observable::new(5usize);
        let total = Computed::from2(&users, &workouts, |u, w| u + w);
        assert_eq!(total.get(), 7);

        workouts.set(6);
        assert_eq!(total.get(), 8);
        users.set(0);
        assert_eq!(total.get(), 6);
    }

    #[test]
    fn three_sources() {
        let a = Observable::new(1);
        let b = Observable::new(2);
        let c = Observable::new(3);
        let sum = Computed::from3(&a, &b, &c, |a, b, c| a + b + c);
        assert_eq!(sum.get(), 6);
        c.set(30);
        assert_eq!(sum.get(), 33);
    }

    #[test]
    fn clones_share_the_cache() {
        let source = Observable::new(1);
        let first = Computed::from_observable(&source, |v| v + 1);
        let second = first.clone();
        assert_eq!(first.get(), 2);
        assert!(!second.is_dirty());
        assert_eq!(second.version(), 1);
    }

    #[test]
    fn from_fn_with_manual_invalidation() {
        let counter = Rc::new(Cell::new(1));
        let counter_clone = Rc::clone(&counter);
        let computed = Computed::from_fn(move || counter_clone.get() * 100, Vec::new());
        assert_eq!(computed.get(), 100);

        counter.set(2);
        assert_eq!(computed.get(), 100);
        computed.invalidate();
        assert_eq!(computed.get(), 200);
    }
}
