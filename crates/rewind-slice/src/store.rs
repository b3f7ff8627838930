#![forbid(unsafe_code)]

//! Single-writer state container over one [`Slice`].
//!
//! Every dispatch runs to completion before the next one starts, so case
//! reducers never observe a partially updated state.

use std::fmt;

use crate::error::Result;
use crate::slice::{Slice, SliceAction};

/// Owns a slice's state and routes actions to it.
pub struct Store<S> {
    slice: Slice<S>,
    state: S,
}

impl<S: fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("slice", &self.slice.name())
            .field("state", &self.state)
            .finish()
    }
}

impl<S> Store<S> {
    /// Create a store starting from the slice's initial state.
    #[must_use]
    pub fn new(slice: Slice<S>) -> Self {
        let state = slice.initial_state();
        Self { slice, state }
    }

    /// Create a store with an explicit starting state.
    #[must_use]
    pub fn with_state(slice: Slice<S>, state: S) -> Self {
        Self { slice, state }
    }

    /// Apply `action`. Returns whether the slice handled it.
    ///
    /// On error the state is left as the failing reducer left it; every
    /// history reducer fails before mutating.
    pub fn dispatch(&mut self, action: &SliceAction) -> Result<bool> {
        self.slice.reduce(&mut self.state, action)
    }

    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[must_use]
    pub fn slice(&self) -> &Slice<S> {
        &self.slice
    }

    #[must_use]
    pub fn into_state(self) -> S {
        self.state
    }
}
