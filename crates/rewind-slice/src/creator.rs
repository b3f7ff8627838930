#![forbid(unsafe_code)]

//! The reducer-creator protocol.
//!
//! A slice is assembled from named [`ReducerDefinition`]s. Plain
//! [`Case`](ReducerDefinition::Case) definitions are installed by the host
//! directly. [`Custom`](ReducerDefinition::Custom) definitions are tagged
//! with the [`CreatorId`] that produced them and routed back to that
//! creator's [`ReducerCreator::handle`] when the slice is built, which may
//! install any case reducers it needs through the
//! [`ReducerHandlingContext`].
//!
//! ```text
//! creator.create() ──► ReducerDefinition::Case(f)          ──► host installs f
//!                  └─► ReducerDefinition::Custom{id, kind} ──► creator.handle(kind, ctx)
//!                                                                └─► ctx.add_case(..)
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, SliceError};
use crate::slice::{InitialState, SliceAction};

/// A reducer for one action type. Errors are host wiring faults.
pub type CaseReducer<S> = Arc<dyn Fn(&mut S, &SliceAction) -> Result<()> + Send + Sync>;

/// Identity of a reducer creator, used to route custom definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CreatorId(&'static str);

impl CreatorId {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CreatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One named entry of a slice.
pub enum ReducerDefinition<S> {
    /// Installed as-is under the reducer's action type.
    Case(CaseReducer<S>),
    /// Handed to the creator `creator` at build time.
    Custom { creator: CreatorId, kind: String },
}

impl<S> ReducerDefinition<S> {
    /// Wrap a closure as a case definition.
    pub fn case<F>(reducer: F) -> Self
    where
        F: Fn(&mut S, &SliceAction) -> Result<()> + Send + Sync + 'static,
    {
        Self::Case(Arc::new(reducer))
    }

    /// A definition to be handled by `creator`.
    pub fn custom(creator: CreatorId, kind: impl Into<String>) -> Self {
        Self::Custom {
            creator,
            kind: kind.into(),
        }
    }
}

impl<S> Clone for ReducerDefinition<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Case(reducer) => Self::Case(Arc::clone(reducer)),
            Self::Custom { creator, kind } => Self::Custom {
                creator: *creator,
                kind: kind.clone(),
            },
        }
    }
}

impl<S> fmt::Debug for ReducerDefinition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Case(_) => f.write_str("Case(..)"),
            Self::Custom { creator, kind } => f
                .debug_struct("Custom")
                .field("creator", creator)
                .field("kind", kind)
                .finish(),
        }
    }
}

/// Where a definition is being installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducerDetails {
    pub slice_name: String,
    pub reducer_name: String,
    /// `"<slice_name>/<reducer_name>"`.
    pub action_type: String,
}

/// Host capabilities available to [`ReducerCreator::handle`].
pub struct ReducerHandlingContext<'a, S> {
    initial_state: &'a InitialState<S>,
    cases: &'a mut HashMap<String, CaseReducer<S>>,
}

impl<'a, S> ReducerHandlingContext<'a, S> {
    pub(crate) fn new(
        initial_state: &'a InitialState<S>,
        cases: &'a mut HashMap<String, CaseReducer<S>>,
    ) -> Self {
        Self {
            initial_state,
            cases,
        }
    }

    /// Install `reducer` for `action_type`, replacing any previous one.
    pub fn add_case(
        &mut self,
        action_type: impl Into<String>,
        reducer: CaseReducer<S>,
    ) -> &mut Self {
        self.cases.insert(action_type.into(), reducer);
        self
    }

    /// The slice's configured initial state.
    #[must_use]
    pub fn initial_state(&self) -> S {
        (self.initial_state)()
    }

    /// The initial-state provider itself, for reducers that need it at
    /// dispatch time.
    #[must_use]
    pub fn initial_state_provider(&self) -> InitialState<S> {
        Arc::clone(self.initial_state)
    }
}

/// A pluggable source of reducer definitions.
///
/// Creators expose their definitions through inherent `create` methods; the
/// trait only covers what the host needs to route custom definitions.
pub trait ReducerCreator<S>: Send + Sync {
    /// The id stamped on this creator's custom definitions.
    fn id(&self) -> CreatorId;

    /// Install a custom definition of kind `kind`.
    ///
    /// The default rejects every kind, which suits creators that only
    /// produce case definitions.
    fn handle(
        &self,
        details: &ReducerDetails,
        kind: &str,
        _ctx: &mut ReducerHandlingContext<'_, S>,
    ) -> Result<()> {
        Err(SliceError::UnrecognizedReducerType {
            creator: self.id(),
            kind: kind.to_owned(),
            reducer: details.reducer_name.clone(),
        })
    }
}
