#![forbid(unsafe_code)]

//! Undo/redo transitions and the snapshot-capture policy.
//!
//! [`HistoryAdapter`] operates on a [`HistoryState`] passed in by the caller.
//! It never holds on to the state between calls; the only thing it remembers
//! is the group key of the last recorded change, which decides whether the
//! next grouped change coalesces.
//!
//! # Capture Policy
//!
//! ```text
//! apply_undoable(state, action, mutate)
//!
//!   meta.undoable == Some(false) ──► mutate(present)           (no history)
//!
//!   group == last_group (both Some) ──► mutate(present)         (coalesce)
//!                                       future.clear()
//!
//!   otherwise ──► past.push_back(present.clone())
//!                 evict oldest while past.len() > limit
//!                 future.clear()
//!                 mutate(present)
//! ```
//!
//! # Invariants
//!
//! 1. `past.len() <= limit` after every recorded change.
//! 2. `future` is empty after every undoable change.
//! 3. A change marked `undoable: false` never alters `past` or `future`.
//! 4. `undo`/`redo` at an exhausted stack leave the state untouched.
//! 5. Navigation (`undo`, `redo`, `jump`, `clear_history`) closes any open
//!    group, so a grouped change after navigation always starts a new frame.

use std::fmt;
use std::marker::PhantomData;

use crate::config::HistoryAdapterConfig;
use crate::meta::{GroupKey, UndoableAction};
use crate::prepare::{WithPayload, WithoutPayload};
use crate::state::HistoryState;

const TARGET: &str = "rewind.history";

/// Undo/redo operations for one kind of tracked data.
///
/// Create one adapter per state slice. The adapter is cheap: it owns its
/// configuration and the last group key, nothing else.
pub struct HistoryAdapter<T> {
    config: HistoryAdapterConfig,
    /// Group of the most recent recorded change, if it was grouped.
    last_group: Option<GroupKey>,
    _data: PhantomData<fn(T) -> T>,
}

impl<T> fmt::Debug for HistoryAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryAdapter")
            .field("config", &self.config)
            .field("last_group", &self.last_group)
            .finish()
    }
}

impl<T> Default for HistoryAdapter<T> {
    fn default() -> Self {
        Self::new(HistoryAdapterConfig::default())
    }
}

impl<T> HistoryAdapter<T> {
    /// Create an adapter with the given configuration.
    #[must_use]
    pub fn new(config: HistoryAdapterConfig) -> Self {
        Self {
            config,
            last_group: None,
            _data: PhantomData,
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &HistoryAdapterConfig {
        &self.config
    }

    /// Group of the last recorded change, if it is still open.
    #[must_use]
    pub fn last_group(&self) -> Option<&GroupKey> {
        self.last_group.as_ref()
    }

    /// Close the open group, forcing the next grouped change into a new frame.
    pub fn reset_group(&mut self) {
        self.last_group = None;
    }

    /// Wrap `data` in a history with no past or future.
    #[must_use]
    pub fn get_initial_state(&self, data: T) -> HistoryState<T> {
        HistoryState::new(data)
    }

    // ====================================================================
    // Navigation
    // ====================================================================

    /// Step back one frame. Returns the number of steps taken (0 or 1).
    pub fn undo(&mut self, state: &mut HistoryState<T>) -> usize {
        self.reset_group();
        let Some(previous) = state.past.pop_back() else {
            tracing::debug!(target: TARGET, "undo with empty past ignored");
            return 0;
        };
        let current = std::mem::replace(&mut state.present, previous);
        state.future.push_front(current);
        tracing::debug!(
            target: TARGET,
            past = state.past.len(),
            future = state.future.len(),
            "undo"
        );
        1
    }

    /// Step forward one frame. Returns the number of steps taken (0 or 1).
    pub fn redo(&mut self, state: &mut HistoryState<T>) -> usize {
        self.reset_group();
        let Some(next) = state.future.pop_front() else {
            tracing::debug!(target: TARGET, "redo with empty future ignored");
            return 0;
        };
        let current = std::mem::replace(&mut state.present, next);
        state.past.push_back(current);
        tracing::debug!(
            target: TARGET,
            past = state.past.len(),
            future = state.future.len(),
            "redo"
        );
        1
    }

    /// Move `n` frames: forward for `n > 0`, back for `n < 0`.
    ///
    /// Steps one frame at a time and stops early at either end, so an
    /// out-of-range jump lands on the nearest reachable frame. Returns the
    /// number of steps taken.
    pub fn jump(&mut self, state: &mut HistoryState<T>, n: isize) -> usize {
        if n == 0 {
            return 0;
        }
        let _span =
            tracing::debug_span!(target: TARGET, "history.jump", requested = n).entered();
        let mut taken = 0;
        for _ in 0..n.unsigned_abs() {
            let step = if n > 0 {
                self.redo(state)
            } else {
                self.undo(state)
            };
            if step == 0 {
                break;
            }
            taken += step;
        }
        tracing::debug!(target: TARGET, requested = n, taken, "jump");
        taken
    }

    /// Forget all past and future frames, keeping `present`.
    ///
    /// Returns the number of frames dropped.
    pub fn clear_history(&mut self, state: &mut HistoryState<T>) -> usize {
        self.reset_group();
        let dropped = state.past.len() + state.future.len();
        state.past.clear();
        state.future.clear();
        tracing::debug!(target: TARGET, dropped, "history cleared");
        dropped
    }

    // ====================================================================
    // Recording
    // ====================================================================

    /// Run `mutate` on `present`, recording a history frame according to the
    /// action's [`UndoableMeta`](crate::UndoableMeta).
    ///
    /// This is the body of an undoable reducer: the host supplies the action
    /// and the adapter decides whether the pre-mutation value becomes a new
    /// undo frame, coalesces into the open group, or is not recorded at all.
    pub fn apply_undoable<A, F>(&mut self, state: &mut HistoryState<T>, action: &A, mutate: F)
    where
        T: Clone,
        A: UndoableAction + ?Sized,
        F: FnOnce(&mut T, &A),
    {
        let meta = action.undoable_meta();
        if meta.is_some_and(|m| !m.is_undoable()) {
            tracing::trace!(target: TARGET, "change applied without history");
            mutate(&mut state.present, action);
            return;
        }

        let group = meta.and_then(|m| m.group.as_ref());
        let coalesce = group.is_some() && group == self.last_group.as_ref();
        let snapshot = (!coalesce).then(|| state.present.clone());

        // History is only touched once `mutate` has returned.
        mutate(&mut state.present, action);

        if let Some(snapshot) = snapshot {
            state.past.push_back(snapshot);
            self.enforce_limit(state);
            tracing::trace!(
                target: TARGET,
                group = %DisplayGroup(group),
                past = state.past.len(),
                "history frame recorded"
            );
        } else {
            tracing::trace!(
                target: TARGET,
                group = %DisplayGroup(group),
                "change coalesced into open group"
            );
        }
        state.future.clear();
        self.last_group = group.cloned();
    }

    /// Evict the oldest frames while `past` exceeds the limit.
    fn enforce_limit(&self, state: &mut HistoryState<T>) {
        let Some(limit) = self.config.limit else {
            return;
        };
        let mut evicted = 0usize;
        while state.past.len() > limit.get() {
            state.past.pop_front();
            evicted += 1;
        }
        if evicted > 0 {
            tracing::debug!(
                target: TARGET,
                evicted,
                limit = limit.get(),
                "oldest history frames evicted"
            );
        }
    }

    // ====================================================================
    // Annotation helpers
    // ====================================================================

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

/// Formats an optional group key for log fields.
struct DisplayGroup<'a>(Option<&'a GroupKey>);

impl fmt::Display for DisplayGroup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(key) => fmt::Display::fmt(key, f),
            None => f.write_str("-"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
