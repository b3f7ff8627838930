#![forbid(unsafe_code)]

//! A minimal slice host.
//!
//! [`SliceBuilder`] collects named reducer definitions and creators, then
//! [`build`](SliceBuilder::build) resolves them into a [`Slice`]: a table of
//! case reducers keyed by action type (`"<slice>/<reducer>"`). Any fault in
//! that resolution fails the build; nothing is installed half-way.
//!
//! Actions carry JSON payloads so one slice can host reducers with different
//! payload shapes.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use rewind_core::{Action, Prepared};
use serde::Serialize;
use serde_json::Value;

use crate::creator::{
    CaseReducer, ReducerCreator, ReducerDefinition, ReducerDetails, ReducerHandlingContext,
};
use crate::error::{Result, SliceError};

const TARGET: &str = "rewind.slice";

/// Action type dispatched to slices.
pub type SliceAction = Action<Value>;

/// Zero-argument accessor for a slice's initial state.
pub type InitialState<S> = Arc<dyn Fn() -> S + Send + Sync>;

/// Builder for a [`Slice`].
pub struct SliceBuilder<S> {
    name: String,
    initial_state: InitialState<S>,
    definitions: Vec<(String, ReducerDefinition<S>)>,
    creators: Vec<Box<dyn ReducerCreator<S>>>,
}

impl<S> fmt::Debug for SliceBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceBuilder")
            .field("name", &self.name)
            .field("definitions", &self.definitions)
            .field(
                "creators",
                &self.creators.iter().map(|c| c.id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<S: 'static> SliceBuilder<S> {
    /// Start a slice named `name` whose initial state comes from `initial_state`.
    pub fn new(
        name: impl Into<String>,
        initial_state: impl Fn() -> S + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            initial_state: Arc::new(initial_state),
            definitions: Vec::new(),
            creators: Vec::new(),
        }
    }

    /// Add one named definition.
    #[must_use]
    pub fn reducer(mut self, name: impl Into<String>, definition: ReducerDefinition<S>) -> Self {
        self.definitions.push((name.into(), definition));
        self
    }

    /// Add several named definitions.
    #[must_use]
    pub fn reducers<I, N>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = (N, ReducerDefinition<S>)>,
        N: Into<String>,
    {
        self.definitions
            .extend(definitions.into_iter().map(|(name, def)| (name.into(), def)));
        self
    }

    /// Register a creator able to handle its own custom definitions.
    #[must_use]
    pub fn creator(mut self, creator: impl ReducerCreator<S> + 'static) -> Self {
        self.creators.push(Box::new(creator));
        self
    }

    /// Resolve every definition into a case reducer.
    pub fn build(self) -> Result<Slice<S>> {
        let Self {
            name,
            initial_state,
            definitions,
            creators,
        } = self;

        let mut seen = HashSet::new();
        let mut cases: HashMap<String, CaseReducer<S>> = HashMap::new();
        let mut reducer_names = Vec::with_capacity(definitions.len());

        for (reducer_name, definition) in definitions {
            if !seen.insert(reducer_name.clone()) {
                return Err(SliceError::DuplicateReducer(reducer_name));
            }
            let details = ReducerDetails {
                action_type: format!("{name}/{reducer_name}"),
                slice_name: name.clone(),
                reducer_name: reducer_name.clone(),
            };

            match definition {
                ReducerDefinition::Case(reducer) => {
                    cases.insert(details.action_type.clone(), reducer);
                }
                ReducerDefinition::Custom { creator, kind } => {
                    let handler = creators
                        .iter()
                        .find(|c| c.id() == creator)
                        .ok_or_else(|| SliceError::UnknownCreator {
                            creator,
                            reducer: reducer_name.clone(),
                        })?;
                    let mut ctx = ReducerHandlingContext::new(&initial_state, &mut cases);
                    handler.handle(&details, &kind, &mut ctx)?;
                }
            }
            tracing::debug!(
                target: TARGET,
                slice = %name,
                action_type = %details.action_type,
                "reducer registered"
            );
            reducer_names.push(reducer_name);
        }

        Ok(Slice {
            name,
            initial_state,
            cases,
            reducer_names,
        })
    }
}

/// A built slice: named case reducers over state `S`.
pub struct Slice<S> {
    name: String,
    initial_state: InitialState<S>,
    cases: HashMap<String, CaseReducer<S>>,
    reducer_names: Vec<String>,
}

impl<S> fmt::Debug for Slice<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slice")
            .field("name", &self.name)
            .field("reducers", &self.reducer_names)
            .finish()
    }
}

impl<S> Slice<S> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A fresh copy of the initial state.
    #[must_use]
    pub fn initial_state(&self) -> S {
        (self.initial_state)()
    }

    /// Reducer names in registration order.
    pub fn reducer_names(&self) -> impl Iterator<Item = &str> {
        self.reducer_names.iter().map(String::as_str)
    }

    /// The action type for `reducer` in this slice.
    #[must_use]
    pub fn action_type(&self, reducer: &str) -> String {
        format!("{}/{reducer}", self.name)
    }

    /// An action creator for `reducer`, if the slice has one by that name.
    #[must_use]
    pub fn action_creator(&self, reducer: &str) -> Option<ActionCreator> {
        self.reducer_names
            .iter()
            .any(|n| n == reducer)
            .then(|| ActionCreator::new(self.action_type(reducer)))
    }

    /// Run the case reducer for `action`, if any.
    ///
    /// Returns `Ok(false)` for action types this slice does not handle.
    pub fn reduce(&self, state: &mut S, action: &SliceAction) -> Result<bool> {
        let Some(reducer) = self.cases.get(&action.kind) else {
            return Ok(false);
        };
        tracing::trace!(target: TARGET, action_type = %action.kind, "reducing");
        reducer(state, action)?;
        Ok(true)
    }
}

/// Builds actions of one type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionCreator {
    action_type: String,
}

impl ActionCreator {
    #[must_use]
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
        }
    }

    #[must_use]
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// An action with no payload and no metadata.
    #[must_use]
    pub fn call(&self) -> SliceAction {
        Action::new(self.action_type.clone(), Value::Null)
    }

    /// An action with `payload` and no metadata.
    #[must_use]
    pub fn with_payload(&self, payload: impl Into<Value>) -> SliceAction {
        Action::new(self.action_type.clone(), payload.into())
    }

    /// An action from a prepared payload and its undo metadata.
    pub fn prepared<P: Serialize>(&self, prepared: Prepared<P>) -> Result<SliceAction> {
        let payload = serde_json::to_value(prepared.payload)?;
        Ok(Action::new(self.action_type.clone(), payload).with_meta(prepared.meta))
    }

    /// Whether `action` was built by this creator.
    #[must_use]
    pub fn matches(&self, action: &SliceAction) -> bool {
        action.kind == self.action_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creator::CreatorId;
    use rewind_core::{UndoableMeta, WithPayload, WithoutPayload};

    fn add(n: &mut i64, action: &SliceAction) -> Result<()> {
        *n += action.payload.as_i64().unwrap_or(1);
        Ok(())
    }

    #[test]
    fn build_routes_case_reducers() {
        let slice = SliceBuilder::new("counter", || 0_i64)
            .reducer("add", ReducerDefinition::case(add))
            .build()
            .unwrap();

        let mut n = slice.initial_state();
        let creator = slice.action_creator("add").unwrap();
        assert!(slice.reduce(&mut n, &creator.with_payload(5)).unwrap());
        assert!(slice.reduce(&mut n, &creator.call()).unwrap());
        assert_eq!(n, 6);
    }

    #[test]
    fn unknown_action_is_ignored() {
        let slice = SliceBuilder::new("counter", || 0_i64)
            .reducer("add", ReducerDefinition::case(add))
            .build()
            .unwrap();
        let mut n = 3;
        let other = ActionCreator::new("other/add").with_payload(1);
        assert!(!slice.reduce(&mut n, &other).unwrap());
        assert_eq!(n, 3);
    }

    #[test]
    fn duplicate_names_fail() {
        let err = SliceBuilder::new("counter", || 0_i64)
            .reducer("add", ReducerDefinition::case(add))
            .reducer("add", ReducerDefinition::case(add))
            .build()
            .unwrap_err();
        assert!(matches!(err, SliceError::DuplicateReducer(ref name) if name == "add"));
    }

    #[test]
    fn custom_without_creator_fails() {
        let err = SliceBuilder::new("counter", || 0_i64)
            .reducer(
                "reset",
                ReducerDefinition::custom(CreatorId::new("missing"), "reset"),
            )
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SliceError::UnknownCreator { creator, ref reducer }
                if creator.name() == "missing" && reducer == "reset"
        ));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn action_creator_naming() {
        let slice = SliceBuilder::new("todos", Vec::<String>::new)
            .reducer("add", ReducerDefinition::case(|_, _| Ok(())))
            .build()
            .unwrap();
        assert_eq!(slice.name(), "todos");
        assert_eq!(slice.action_type("add"), "todos/add");
        assert!(slice.action_creator("remove").is_none());
        let creator = slice.action_creator("add").unwrap();
        assert_eq!(creator.action_type(), "todos/add");
        assert!(creator.matches(&creator.call()));
        assert_eq!(slice.reducer_names().collect::<Vec<_>>(), ["add"]);
    }

    #[test]
    fn prepared_actions_carry_meta() {
        let creator = ActionCreator::new("doc/rename");
        let action = creator
            .prepared(WithPayload::<&str>::new().grouped("title", "typing"))
            .unwrap();
        assert_eq!(action.payload, Value::from("title"));
        assert_eq!(action.meta, Some(UndoableMeta::grouped("typing")));

        let action = creator.prepared(WithoutPayload.skip_history()).unwrap();
        assert_eq!(action.payload, Value::Null);
        assert_eq!(action.meta, Some(UndoableMeta::skip_history()));
    }

    #[test]
    fn debug_lists_reducers() {
        let slice = SliceBuilder::new("counter", || 0_i64)
            .reducer("add", ReducerDefinition::case(add))
            .build()
            .unwrap();
        let out = format!("{slice:?}");
        assert!(out.contains("counter"));
        assert!(out.contains("add"));
    }
}
