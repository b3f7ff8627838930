#![forbid(unsafe_code)]

//! Registration and dispatch faults.
//!
//! Every variant signals a wiring bug in the host integration, not a user
//! condition. Callers should propagate these rather than retry.

use thiserror::Error;

use crate::creator::CreatorId;

#[derive(Debug, Error)]
pub enum SliceError {
    /// A creator was asked to handle a definition kind it never produces.
    #[error("unrecognised reducer type `{kind}` for creator `{creator}` (reducer `{reducer}`)")]
    UnrecognizedReducerType {
        creator: CreatorId,
        kind: String,
        reducer: String,
    },
    /// A custom definition names a creator the slice was not given.
    #[error("reducer `{reducer}` needs creator `{creator}`, which is not registered")]
    UnknownCreator { creator: CreatorId, reducer: String },
    #[error("duplicate reducer `{0}`")]
    DuplicateReducer(String),
    #[error("invalid payload for `{action_type}`: {reason}")]
    InvalidPayload { action_type: String, reason: String },
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SliceError>;
