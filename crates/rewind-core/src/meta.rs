#![forbid(unsafe_code)]

//! Undo metadata attached to actions.
//!
//! An action reaches the adapter with an optional [`UndoableMeta`]. Absent
//! metadata means "undoable, ungrouped".

use std::borrow::Cow;
use std::fmt;

/// Key under which consecutive undoable actions share one history frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    /// Named group (e.g. `"drag"`, `"typing"`).
    Text(Cow<'static, str>),
    /// Numeric group (e.g. a gesture or widget id).
    Int(i64),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&'static str> for GroupKey {
    fn from(s: &'static str) -> Self {
        Self::Text(Cow::Borrowed(s))
    }
}

impl From<String> for GroupKey {
    fn from(s: String) -> Self {
        Self::Text(Cow::Owned(s))
    }
}

impl From<i64> for GroupKey {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for GroupKey {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u32> for GroupKey {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<usize> for GroupKey {
    fn from(n: usize) -> Self {
        // Ids past i64::MAX wrap; grouping only needs equality.
        Self::Int(n as i64)
    }
}

/// Undo/redo metadata for a single action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UndoableMeta {
    /// `Some(false)` applies the change without recording history.
    pub undoable: Option<bool>,
    /// Consecutive undoable actions with the same key coalesce.
    pub group: Option<GroupKey>,
}

impl UndoableMeta {
    /// Metadata for a change that must not create a history frame.
    #[must_use]
    pub fn skip_history() -> Self {
        Self {
            undoable: Some(false),
            group: None,
        }
    }

    /// Metadata for an undoable change in group `key`.
    #[must_use]
    pub fn grouped(key: impl Into<GroupKey>) -> Self {
        Self {
            undoable: None,
            group: Some(key.into()),
        }
    }

    /// Set the grouping key.
    #[must_use]
    pub fn with_group(mut self, key: impl Into<GroupKey>) -> Self {
        self.group = Some(key.into());
        self
    }

    /// Whether the change should be recorded. Only an explicit `false` opts out.
    #[must_use]
    pub fn is_undoable(&self) -> bool {
        self.undoable != Some(false)
    }
}

impl From<bool> for UndoableMeta {
    fn from(undoable: bool) -> Self {
        Self {
            undoable: Some(undoable),
            group: None,
        }
    }
}

impl From<GroupKey> for UndoableMeta {
    fn from(key: GroupKey) -> Self {
        Self::grouped(key)
    }
}

/// Anything the adapter can read [`UndoableMeta`] from.
pub trait UndoableAction {
    /// The attached metadata, if any.
    fn undoable_meta(&self) -> Option<&UndoableMeta>;
}

impl UndoableAction for UndoableMeta {
    fn undoable_meta(&self) -> Option<&UndoableMeta> {
        Some(self)
    }
}

impl UndoableAction for Option<UndoableMeta> {
    fn undoable_meta(&self) -> Option<&UndoableMeta> {
        self.as_ref()
    }
}

impl UndoableAction for () {
    fn undoable_meta(&self) -> Option<&UndoableMeta> {
        None
    }
}

/// A dispatched action: a type tag, a payload, and optional undo metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Action<P = ()> {
    /// Action type, conventionally `"<slice>/<reducer>"`.
    pub kind: String,
    pub payload: P,
    pub meta: Option<UndoableMeta>,
}

impl<P> Action<P> {
    /// Create an action without metadata.
    #[must_use]
    pub fn new(kind: impl Into<String>, payload: P) -> Self {
        Self {
            kind: kind.into(),
            payload,
            meta: None,
        }
    }

    /// Attach metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: impl Into<UndoableMeta>) -> Self {
        self.meta = Some(meta.into());
        self
    }
}

impl<P> UndoableAction for Action<P> {
    fn undoable_meta(&self) -> Option<&UndoableMeta> {
        self.meta.as_ref()
    }
}
