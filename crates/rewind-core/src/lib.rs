#![forbid(unsafe_code)]

//! Rewind core
//!
//! Snapshot-based undo/redo for reducer-style state. A [`HistoryState`] wraps
//! any value with a bounded timeline of full snapshots, and a
//! [`HistoryAdapter`] moves through that timeline or records new frames
//! around a state-changing operation.
//!
//! # Key Components
//!
//! - [`HistoryState`] - past stack, present value, future stack
//! - [`HistoryAdapter`] - `undo`, `redo`, `jump`, `clear_history` and the
//!   capture policy applied by [`HistoryAdapter::apply_undoable`]
//! - [`UndoableMeta`] - per-action undoability flag and grouping key
//! - [`WithPayload`] / [`WithoutPayload`] - action preparation helpers that
//!   attach [`UndoableMeta`]
//! - [`HistoryAdapterConfig`] - history limit
//!
//! # Example
//!
//! ```
//! use rewind_core::{HistoryAdapter, HistoryAdapterConfig, UndoableMeta};
//!
//! let mut adapter = HistoryAdapter::new(HistoryAdapterConfig::default());
//! let mut state = adapter.get_initial_state(0);
//!
//! adapter.apply_undoable(&mut state, &UndoableMeta::default(), |n, _| *n += 1);
//! assert_eq!(state.present, 1);
//!
//! adapter.undo(&mut state);
//! assert_eq!(state.present, 0);
//! ```
//!
//! # Role in Rewind
//! `rewind-core` knows nothing about how actions are routed. The
//! `rewind-slice` crate plugs these operations into a reducer-composition
//! host.

pub mod adapter;
pub mod config;
pub mod meta;
pub mod prepare;
pub mod state;

pub use adapter::HistoryAdapter;
pub use config::{ConfigError, HistoryAdapterConfig};
pub use meta::{Action, GroupKey, UndoableAction, UndoableMeta};
pub use prepare::{Prepared, WithPayload, WithoutPayload};
pub use state::HistoryState;

/// Persistent collection types for snapshot-friendly state.
///
/// Every history frame is a full clone of the tracked value. When that value
/// is built from these collections, cloning shares structure instead of
/// copying it, so deep histories of large states stay cheap.
///
/// ```
/// use rewind_core::persistent;
///
/// let mut doc = persistent::Vector::new();
/// doc.push_back("line");
/// let snapshot = doc.clone(); // O(1), shares structure
/// assert_eq!(snapshot, doc);
/// ```
#[cfg(feature = "hamt")]
pub mod persistent {
    pub use im::{HashMap, HashSet, OrdMap, OrdSet, Vector};

}
