use std::fmt;
use std::rc::Rc;

use crate::pipeline::state::MiddlewareState;

/// Middleware option that is either fixed or derived from the live pipeline state.
///
/// `Computed` closures are evaluated immediately before every middleware invocation,
/// including every pass after a reset, so they always observe the current placement and rects.
pub enum Derivable<T, E> {
    /// Fixed value.
    Static(T),
    /// Value computed from the state the middleware is about to run with.
    Computed(Rc<dyn Fn(&MiddlewareState<'_, E>) -> T>),
}

impl<T, E> Derivable<T, E> {
    /// Wrap a state-dependent closure.
    pub fn computed(f: impl Fn(&MiddlewareState<'_, E>) -> T + 'static) -> Self {
        Derivable::Computed(Rc::new(f))
    }

    /// Return `true` when the value depends on state.
    pub fn is_computed(&self) -> bool {
        matches!(self, Derivable::Computed(_))
    }
}

impl<T: Clone, E> Derivable<T, E> {
    /// Resolve against `state`.
    pub fn resolve(&self, state: &MiddlewareState<'_, E>) -> T {
        match self {
            Derivable::Static(v) => v.clone(),
            Derivable::Computed(f) => f(state),
        }
    }

    /// The fixed value, if any.
    pub fn as_static(&self) -> Option<&T> {
        match self {
            Derivable::Static(v) => Some(v),
            Derivable::Computed(_) => None,
        }
    }
}

impl<T, E> From<T> for Derivable<T, E> {
    fn from(v: T) -> Self {
        Derivable::Static(v)
    }
}

impl<T: Clone, E> Clone for Derivable<T, E> {
    fn clone(&self) -> Self {
        match self {
            Derivable::Static(v) => Derivable::Static(v.clone()),
            Derivable::Computed(f) => Derivable::Computed(Rc::clone(f)),
        }
    }
}

impl<T: Default, E> Default for Derivable<T, E> {
    fn default() -> Self {
        Derivable::Static(T::default())
    }
}

impl<T: fmt::Debug, E> fmt::Debug for Derivable<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Derivable::Static(v) => f.debug_tuple("Static").field(v).finish(),
            Derivable::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
