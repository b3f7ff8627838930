#![forbid(unsafe_code)]

//! Rewind slice integration
//!
//! Plugs the `rewind-core` history adapter into a reducer-composition host.
//! The host protocol is an explicit trait, [`ReducerCreator`], rather than
//! a global registry: a slice is handed its creators when it is built.
//!
//! # Key Components
//!
//! - [`make_creators`] - one adapter per slice, two creator entries over it
//! - [`HistoryMethodsCreator`] - `undo`, `redo`, `jump`, `clear_history`, `reset`
//! - [`UndoableCreator`] - wraps data mutations with the capture policy
//! - [`SliceBuilder`] / [`Slice`] - reference host resolving definitions
//! - [`Store`] - single-writer state container over a slice
//!
//! Registration faults ([`SliceError`]) surface from
//! [`SliceBuilder::build`] and [`Slice::reduce`]; they indicate wiring bugs
//! and are never swallowed.

pub mod creator;
pub mod error;
pub mod history;
pub mod slice;
pub mod store;

pub use creator::{
    CaseReducer, CreatorId, ReducerCreator, ReducerDefinition, ReducerDetails,
    ReducerHandlingContext,
};
pub use error::SliceError;
pub use history::{
    Creators, HISTORY_METHODS, HistoryMethods, HistoryMethodsCreator, RESET_KIND, SharedAdapter,
    UNDOABLE, UndoableCreator, make_creators,
};
pub use slice::{ActionCreator, InitialState, Slice, SliceAction, SliceBuilder};
pub use store::Store;
