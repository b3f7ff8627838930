#![forbid(unsafe_code)]

//! Action preparation helpers.
//!
//! Hosts build actions from a payload plus metadata. These helpers produce
//! that pair with [`UndoableMeta`] attached, so the call site decides
//! whether a change is recorded and how it groups:
//!
//! ```
//! use rewind_core::{GroupKey, UndoableMeta, WithPayload, WithoutPayload};
//!
//! let set_title = WithPayload::<String>::new();
//! let typed = set_title.grouped("Draft".to_string(), "typing");
//! assert_eq!(typed.meta.group, Some(GroupKey::from("typing")));
//!
//! let toggle = WithoutPayload;
//! assert_eq!(toggle.skip_history().meta, UndoableMeta::skip_history());
//! ```
//!
//! Builders hold no state: equal inputs always give equal [`Prepared`]
//! values.

use std::fmt;
use std::marker::PhantomData;

use crate::meta::{GroupKey, UndoableMeta};

/// Payload and metadata ready to be stamped with an action type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Prepared<P> {
    pub payload: P,
    pub meta: UndoableMeta,
}

impl<P> Prepared<P> {
    /// Convert the payload, keeping the metadata.
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> Prepared<Q> {
        Prepared {
            payload: f(self.payload),
            meta: self.meta,
        }
    }
}

/// Preparation for actions that carry no payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WithoutPayload;

impl WithoutPayload {
    /// Attach arbitrary metadata.
    #[must_use]
    pub fn prepare(&self, meta: impl Into<UndoableMeta>) -> Prepared<()> {
        Prepared {
            payload: (),
            meta: meta.into(),
        }
    }

    /// A recorded, ungrouped change.
    #[must_use]
    pub fn undoable(&self) -> Prepared<()> {
        self.prepare(UndoableMeta::default())
    }

    /// A change that bypasses history.
    #[must_use]
    pub fn skip_history(&self) -> Prepared<()> {
        self.prepare(UndoableMeta::skip_history())
    }

    /// A recorded change coalescing with neighbours under `key`.
    #[must_use]
    pub fn grouped(&self, key: impl Into<GroupKey>) -> Prepared<()> {
        self.prepare(UndoableMeta::grouped(key))
    }
}

/// Preparation for actions carrying a `P` payload.
pub struct WithPayload<P>(PhantomData<fn(P) -> P>);

impl<P> WithPayload<P> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// Attach arbitrary metadata to `payload`.
    #[must_use]
    pub fn prepare(&self, payload: P, meta: impl Into<UndoableMeta>) -> Prepared<P> {
        Prepared {
            payload,
            meta: meta.into(),
        }
    }

    /// A recorded, ungrouped change.
    #[must_use]
    pub fn undoable(&self, payload: P) -> Prepared<P> {
        self.prepare(payload, UndoableMeta::default())
    }

    /// A change that bypasses history.
    #[must_use]
    pub fn skip_history(&self, payload: P) -> Prepared<P> {
        self.prepare(payload, UndoableMeta::skip_history())
    }

    /// A recorded change coalescing with neighbours under `key`.
    #[must_use]
    pub fn grouped(&self, payload: P, key: impl Into<GroupKey>) -> Prepared<P> {
        self.prepare(payload, UndoableMeta::grouped(key))
    }
}

// Manual impls: `P` itself need not be Clone/Debug/Default.
impl<P> Clone for WithPayload<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for WithPayload<P> {}

impl<P> Default for WithPayload<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for WithPayload<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WithPayload")
            .field("payload", &std::any::type_name::<P>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_payload_variants() {
        let helper = WithoutPayload;
        assert!(helper.undoable().meta.is_undoable());
        assert!(!helper.skip_history().meta.is_undoable());
        assert_eq!(helper.grouped("g").meta, UndoableMeta::grouped("g"));
        assert_eq!(helper.prepare(false).meta.undoable, Some(false));
    }

    #[test]
    fn with_payload_keeps_payload() {
        let helper = WithPayload::<Vec<u8>>::new();
        let prepared = helper.grouped(vec![1, 2], 9_i64);
        assert_eq!(prepared.payload, vec![1, 2]);
        assert_eq!(prepared.meta.group, Some(GroupKey::Int(9)));

        let skipped = helper.skip_history(vec![]);
        assert!(skipped.payload.is_empty());
        assert!(!skipped.meta.is_undoable());
    }

    #[test]
    fn builders_are_referentially_transparent() {
        let helper = WithPayload::<&str>::default();
        assert_eq!(helper.grouped("x", "g"), helper.grouped("x", "g"));
        assert_eq!(helper.undoable("x"), helper.undoable("x"));
        assert_eq!(WithoutPayload.skip_history(), WithoutPayload.skip_history());
    }

    #[test]
    fn map_payload_preserves_meta() {
        let prepared = WithPayload::<u8>::new().grouped(4, "g").map_payload(u32::from);
        assert_eq!(prepared.payload, 4_u32);
        assert_eq!(prepared.meta, UndoableMeta::grouped("g"));
    }

    #[test]
    fn debug_names_payload_type() {
        let s = format!("{:?}", WithPayload::<u16>::new());
        assert!(s.contains("u16"));
    }
}
