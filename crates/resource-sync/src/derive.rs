//! # Derived Values & Render Dispatch
//!
//! The view never branches on raw resource fields. It asks [`dispatch`] which one of a
//! closed set of [`ListView`] variants to draw, or reads the memoized signals in
//! [`ListSignals`].
//!
//! Precedence follows the page templates: a pending load wins, then an error, then
//! content, then the empty state.

use crate::error::LoadError;
use crate::reactive::Computed;
use crate::resource::{Resource, ResourceState, Status};

/// Anything with a length. Lets "has items" and the empty state work on any collection.
pub trait Collection {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> Collection for Vec<E> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// What a list page should render.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    /// Nothing requested yet.
    Idle,
    Loading,
    Failed(LoadError),
    Empty,
    Ready(T),
}

/// Map one resource snapshot to exactly one render variant.
pub fn dispatch<T: Collection + Clone>(state: &ResourceState<T>) -> ListView<T> {
    if state.status == Status::Loading {
        return ListView::Loading;
    }
    if let Some(error) = &state.error {
        return ListView::Failed(error.clone());
    }
    match state.status {
        Status::Idle => ListView::Idle,
        _ if state.value.is_empty() => ListView::Empty,
        _ => ListView::Ready(state.value.clone()),
    }
}

/// The memoized values every list page reads.
#[derive(Clone)]
pub struct ListSignals<T> {
    pub is_loading: Computed<bool>,
    pub has_error: Computed<bool>,
    pub has_items: Computed<bool>,
    pub items: Computed<T>,
    pub view: Computed<ListView<T>>,
}

impl<T: Collection + Clone + PartialEq + 'static> ListSignals<T> {
    pub fn new(resource: &Resource<T>) -> Self {
        let state = resource.state();
        Self {
            is_loading: Computed::from_observable(state, |s| s.status == Status::Loading),
            has_error: Computed::from_observable(state, |s| s.status == Status::Error),
            has_items: Computed::from_observable(state, |s| !s.value.is_empty()),
            items: Computed::from_observable(state, |s| s.value.clone()),
            view: Computed::from_observable(state, dispatch::<T>),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    fn state(status: Status, value: Vec<u32>, error: Option<LoadError>) -> ResourceState<Vec<u32>> {
        ResourceState {
            status,
            value,
            error,
            generation: 1,
        }
    }

    #[test]
    fn dispatch_covers_every_state() {
        let failure = LoadError::Transport(TransportError::Closed);

        assert_eq!(dispatch(&state(Status::Idle, vec![], None)), ListView::Idle);
        assert_eq!(dispatch(&state(Status::Loading, vec![1], None)), ListView::Loading);
        assert_eq!(
            dispatch(&state(Status::Error, vec![], Some(failure.clone()))),
            ListView::Failed(failure)
        );
        assert_eq!(dispatch(&state(Status::Success, vec![], None)), ListView::Empty);
        assert_eq!(
            dispatch(&state(Status::Success, vec![1, 2], None)),
            ListView::Ready(vec![1, 2])
        );
    }

    #[test]
    fn loading_wins_over_a_previous_error() {
        let failure = LoadError::Transport(TransportError::Closed);
        assert_eq!(
            dispatch(&state(Status::Loading, vec![], Some(failure))),
            ListView::Loading
        );
    }

    #[test]
    fn signals_follow_the_resource_state() {
        let resource: Resource<Vec<u32>> = Resource::new(Vec::new());
        let signals = ListSignals::new(&resource);
        assert!(!signals.is_loading.get());
        assert_eq!(signals.view.get(), ListView::Idle);

        resource.state().update(|s| {
            s.status = Status::Success;
            s.value = vec![7];
        });

        assert!(signals.has_items.get());
        assert!(!signals.has_error.get());
        assert_eq!(signals.items.get(), vec![7]);
        assert_eq!(signals.view.get(), ListView::Ready(vec![7]));
    }

    #[test]
    fn has_error_follows_the_status() {
        let resource: Resource<Vec<u32>> = Resource::new(Vec::new());
        let signals = ListSignals::new(&resource);
        let failure = LoadError::Transport(TransportError::Closed);

        resource.state().update(|s| {
            s.status = Status::Error;
            s.error = Some(failure.clone());
        });
        assert!(signals.has_error.get());
        assert_eq!(signals.view.get(), ListView::Failed(failure.clone()));

        // A stale error left on a loading state is not an error.
        resource.state().update(|s| s.status = Status::Loading);
        assert!(!signals.has_error.get());
        assert!(signals.is_loading.get());
        assert_eq!(signals.view.get(), ListView::Loading);
    }
}
