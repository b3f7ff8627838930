#![forbid(unsafe_code)]

//! History creators: plug a [`HistoryAdapter`] into a slice.
//!
//! [`make_creators`] builds one adapter and two creator entries over it:
//!
//! - [`HistoryMethodsCreator`] yields `undo`, `redo`, `jump`,
//!   `clear_history` and `reset` for a slice whose state is a
//!   [`HistoryState`].
//! - [`UndoableCreator`] wraps a mutation of the inner data so that
//!   dispatching it records history, plus the action preparation helpers.
//!
//! ```
//! use rewind_core::{HistoryAdapterConfig, HistoryState};
//! use rewind_slice::{SliceBuilder, make_creators};
//!
//! let creators = make_creators::<i64>(HistoryAdapterConfig::default());
//! let slice = SliceBuilder::new("counter", || HistoryState::new(0))
//!     .reducers(creators.history_methods.create().into_definitions())
//!     .reducer("increment", creators.undoable.create(|n, _| *n += 1))
//!     .creator(creators.history_methods.clone())
//!     .build()?;
//!
//! let mut state = slice.initial_state();
//! let increment = slice.action_creator("increment").unwrap();
//! let undo = slice.action_creator("undo").unwrap();
//!
//! slice.reduce(&mut state, &increment.call())?;
//! slice.reduce(&mut state, &undo.call())?;
//! assert_eq!(state.present, 0);
//! # Ok::<(), rewind_slice::SliceError>(())
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use rewind_core::{
    HistoryAdapter, HistoryAdapterConfig, HistoryState, WithPayload, WithoutPayload,
};
use serde::de::DeserializeOwned;

use crate::creator::{
    CreatorId, ReducerCreator, ReducerDefinition, ReducerDetails, ReducerHandlingContext,
};
use crate::error::{Result, SliceError};
use crate::slice::SliceAction;

/// Id of [`HistoryMethodsCreator`].
pub const HISTORY_METHODS: CreatorId = CreatorId::new("history_methods");
/// Id of [`UndoableCreator`].
pub const UNDOABLE: CreatorId = CreatorId::new("undoable");

/// The only custom definition kind [`HistoryMethodsCreator`] handles.
pub const RESET_KIND: &str = "reset";

/// An adapter shared by every reducer of one slice.
pub type SharedAdapter<T> = Arc<Mutex<HistoryAdapter<T>>>;

fn lock<T>(adapter: &SharedAdapter<T>) -> MutexGuard<'_, HistoryAdapter<T>> {
    // A panicking user mutation poisons the lock; the adapter records
    // nothing until the mutation has returned.
    adapter.lock().unwrap_or_else(|e| e.into_inner())
}

/// Formats a shared adapter without blocking. Creators may be formatted
/// from inside a mutation, while the adapter lock is held.
struct AdapterDebug<'a, T>(&'a SharedAdapter<T>);

impl<T> fmt::Debug for AdapterDebug<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_lock() {
            Ok(adapter) => fmt::Debug::fmt(&*adapter, f),
            Err(TryLockError::Poisoned(e)) => fmt::Debug::fmt(&*e.into_inner(), f),
            Err(TryLockError::WouldBlock) => f.write_str("<locked>"),
        }
    }
}

// ============================================================================
// History methods
// ============================================================================

/// Definitions produced by [`HistoryMethodsCreator::create`].
#[derive(Debug, Clone)]
pub struct HistoryMethods<T> {
    pub undo: ReducerDefinition<HistoryState<T>>,
    pub redo: ReducerDefinition<HistoryState<T>>,
    /// Reads an integer payload.
    pub jump: ReducerDefinition<HistoryState<T>>,
    pub clear_history: ReducerDefinition<HistoryState<T>>,
    /// Restores the slice's initial state; installed by
    /// [`HistoryMethodsCreator::handle`].
    pub reset: ReducerDefinition<HistoryState<T>>,
}

impl<T> HistoryMethods<T> {
    /// The definitions under their conventional reducer names.
    #[must_use]
    pub fn into_definitions(self) -> [(&'static str, ReducerDefinition<HistoryState<T>>); 5] {
        [
            ("undo", self.undo),
            ("redo", self.redo),
            ("jump", self.jump),
            ("clear_history", self.clear_history),
            ("reset", self.reset),
        ]
    }
}

/// Creator for the fixed history operations of a [`HistoryState`] slice.
pub struct HistoryMethodsCreator<T> {
    adapter: SharedAdapter<T>,
}

impl<T> HistoryMethodsCreator<T> {
    #[must_use]
    pub fn new(adapter: SharedAdapter<T>) -> Self {
        Self { adapter }
    }

    /// The adapter behind these methods.
    #[must_use]
    pub fn adapter(&self) -> &SharedAdapter<T> {
        &self.adapter
    }
}

impl<T: 'static> HistoryMethodsCreator<T> {
    /// Build the history method definitions.
    #[must_use]
    pub fn create(&self) -> HistoryMethods<T> {
        let undo = Arc::clone(&self.adapter);
        let redo = Arc::clone(&self.adapter);
        let jump = Arc::clone(&self.adapter);
        let clear = Arc::clone(&self.adapter);

        HistoryMethods {
            undo: ReducerDefinition::case(move |state, _| {
                lock(&undo).undo(state);
                Ok(())
            }),
            redo: ReducerDefinition::case(move |state, _| {
                lock(&redo).redo(state);
                Ok(())
            }),
            jump: ReducerDefinition::case(move |state, action| {
                let n = jump_steps(action)?;
                lock(&jump).jump(state, n);
                Ok(())
            }),
            clear_history: ReducerDefinition::case(move |state, _| {
                lock(&clear).clear_history(state);
                Ok(())
            }),
            reset: ReducerDefinition::custom(HISTORY_METHODS, RESET_KIND),
        }
    }
}

fn jump_steps(action: &SliceAction) -> Result<isize> {
    action
        .payload
        .as_i64()
        .and_then(|n| isize::try_from(n).ok())
        .ok_or_else(|| SliceError::InvalidPayload {
            action_type: action.kind.clone(),
            reason: format!("expected an integer step count, got {}", action.payload),
        })
}

impl<T: 'static> ReducerCreator<HistoryState<T>> for HistoryMethodsCreator<T> {
    fn id(&self) -> CreatorId {
        HISTORY_METHODS
    }

    fn handle(
        &self,
        details: &ReducerDetails,
        kind: &str,
        ctx: &mut ReducerHandlingContext<'_, HistoryState<T>>,
    ) -> Result<()> {
        if kind != RESET_KIND {
            return Err(SliceError::UnrecognizedReducerType {
                creator: HISTORY_METHODS,
                kind: kind.to_owned(),
                reducer: details.reducer_name.clone(),
            });
        }
        let initial_state = ctx.initial_state_provider();
        let adapter = Arc::clone(&self.adapter);
        ctx.add_case(
            details.action_type.clone(),
            Arc::new(move |state: &mut HistoryState<T>, _: &SliceAction| -> Result<()> {
                lock(&adapter).reset_group();
                *state = initial_state();
                tracing::debug!(target: "rewind.history", "history reset to initial state");
                Ok(())
            }),
        );
        Ok(())
    }
}

impl<T> Clone for HistoryMethodsCreator<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.adapter))
    }
}

impl<T> fmt::Debug for HistoryMethodsCreator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryMethodsCreator")
            .field("adapter", &AdapterDebug(&self.adapter))
            .finish()
    }
}

// ============================================================================
// Undoable
// ============================================================================

/// Creator for undoable mutations of the data inside a [`HistoryState`].
pub struct UndoableCreator<T> {
    adapter: SharedAdapter<T>,
}

impl<T> UndoableCreator<T> {
    #[must_use]
    pub fn new(adapter: SharedAdapter<T>) -> Self {
        Self { adapter }
    }

    /// The adapter behind this creator.
    #[must_use]
    pub fn adapter(&self) -> &SharedAdapter<T> {
        &self.adapter
    }

    /// Preparation helper for actions carrying a `P` payload.
    #[must_use]
    pub fn with_payload<P>(&self) -> WithPayload<P> {
        WithPayload::new()
    }

    /// Preparation helper for actions without a payload.
    #[must_use]
    pub fn without_payload(&self) -> WithoutPayload {
        WithoutPayload
    }
}

impl<T: Clone + 'static> UndoableCreator<T> {
    /// Wrap `mutate` so that dispatching it records history per the
    /// action's metadata.
    pub fn create<F>(&self, mutate: F) -> ReducerDefinition<HistoryState<T>>
    where
        F: Fn(&mut T, &SliceAction) + Send + Sync + 'static,
    {
        let adapter = Arc::clone(&self.adapter);
        ReducerDefinition::case(move |state, action| {
            lock(&adapter).apply_undoable(state, action, &mutate);
            Ok(())
        })
    }

    /// Like [`create`](Self::create), but decodes the payload as `P` first.
    ///
    /// A payload that does not decode fails with
    /// [`SliceError::InvalidPayload`] before history is touched.
    pub fn create_typed<P, F>(&self, mutate: F) -> ReducerDefinition<HistoryState<T>>
    where
        P: DeserializeOwned,
        F: Fn(&mut T, P) + Send + Sync + 'static,
    {
        let adapter = Arc::clone(&self.adapter);
        ReducerDefinition::case(move |state, action| {
            let payload: P = serde_json::from_value(action.payload.clone()).map_err(|e| {
                SliceError::InvalidPayload {
                    action_type: action.kind.clone(),
                    reason: e.to_string(),
                }
            })?;
            lock(&adapter).apply_undoable(state, action, |data, _| mutate(data, payload));
            Ok(())
        })
    }
}

impl<T> ReducerCreator<HistoryState<T>> for UndoableCreator<T> {
    fn id(&self) -> CreatorId {
        UNDOABLE
    }
}

impl<T> Clone for UndoableCreator<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.adapter))
    }
}

impl<T> fmt::Debug for UndoableCreator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoableCreator")
            .field("adapter", &AdapterDebug(&self.adapter))
            .finish()
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Both creator entries, sharing one adapter.
#[derive(Debug, Clone)]
pub struct Creators<T> {
    pub history_methods: HistoryMethodsCreator<T>,
    pub undoable: UndoableCreator<T>,
}

impl<T> Creators<T> {
    /// The shared adapter.
    #[must_use]
    pub fn adapter(&self) -> &SharedAdapter<T> {
        self.history_methods.adapter()
    }
}

/// Build one adapter for a slice and both creator entries over it.
#[must_use]
pub fn make_creators<T>(config: HistoryAdapterConfig) -> Creators<T> {
    let adapter: SharedAdapter<T> = Arc::new(Mutex::new(HistoryAdapter::new(config)));
    Creators {
        history_methods: HistoryMethodsCreator::new(Arc::clone(&adapter)),
        undoable: UndoableCreator::new(adapter),
    }
}
