#![forbid(unsafe_code)]

//! The history timeline.
//!
//! ```text
//! past [s0, s1, s2], present s3, then undo() x2
//! ┌──────────────────────────────────────────────┐
//! │ Past:     [s0]              (oldest first)    │
//! │ Present:  s1                                  │
//! │ Future:   [s2, s3]          (next redo first) │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `past` holds strictly prior values, oldest at the front.
//! 2. `future` holds strictly later values, the next redo target at the front.
//! 3. `present` is never stored in either stack.

use std::collections::VecDeque;

/// A value together with its undo and redo snapshots.
///
/// Fields are public so hosts can read the timeline directly, but all
/// transitions should go through [`HistoryAdapter`](crate::HistoryAdapter).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct HistoryState<T> {
    /// Previously held values, oldest first.
    pub past: VecDeque<T>,
    /// The current value.
    pub present: T,
    /// Undone values, most recently undone first.
    pub future: VecDeque<T>,
}

impl<T> HistoryState<T> {
    /// Wrap `present` with empty history.
    #[must_use]
    pub fn new(present: T) -> Self {
        Self {
            past: VecDeque::new(),
            present,
            future: VecDeque::new(),
        }
    }

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of frames available for undo.
    #[must_use]
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    /// Number of frames available for redo.
    #[must_use]
    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Drop the timeline and keep only the current value.
    #[must_use]
    pub fn into_present(self) -> T {
        self.present
    }
}

impl<T> From<T> for HistoryState<T> {
    fn from(present: T) -> Self {
        Self::new(present)
    }
}
