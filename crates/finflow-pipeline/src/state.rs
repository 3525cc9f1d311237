//! The shared state record threaded through the pipeline.
//!
//! A record is created with only the user id, then extended once per stage
//! by merging the stage's partial update. Merging never mutates in place:
//! each merge produces a new record, and a field already present rejects a
//! second writer outright.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field written by the analyzer stage.
pub const ANALYSIS_RESULT: &str = "analysis_result";
/// Field written by the budgetor stage.
pub const BUDGET_PLAN: &str = "budget_plan";
/// Field written by the investor stage.
pub const INVESTMENT_OPTIONS: &str = "investment_options";

/// State merge errors.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// A stage attempted to write a field another stage already wrote
    #[error("field already written: {field}")]
    DuplicateWriter {
        /// The contested field name
        field: String,
    },
}

/// A partial update returned by a stage: field name to artifact text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    fields: IndexMap<String, String>,
}

impl StateUpdate {
    /// An empty update.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An update carrying a single field.
    #[must_use]
    pub fn single(field: impl Into<String>, value: impl Into<String>) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(field.into(), value.into());
        Self { fields }
    }

    /// Add a field to the update.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Whether the update carries no fields.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The shared state record.
///
/// `user_id` is set at construction and immutable; stage artifacts
/// accumulate in an ordered map, one writer per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    user_id: String,
    artifacts: IndexMap<String, String>,
}

impl RunState {
    /// Create a fresh record for a run, populated only with the user id.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            artifacts: IndexMap::new(),
        }
    }

    /// The user this run belongs to.
    #[inline]
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Look up an artifact by field name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.artifacts.get(field).map(String::as_str)
    }

    /// The analyzer's artifact, if written.
    #[inline]
    #[must_use]
    pub fn analysis_result(&self) -> Option<&str> {
        self.get(ANALYSIS_RESULT)
    }

    /// The budgetor's artifact, if written.
    #[inline]
    #[must_use]
    pub fn budget_plan(&self) -> Option<&str> {
        self.get(BUDGET_PLAN)
    }

    /// The investor's artifact, if written.
    #[inline]
    #[must_use]
    pub fn investment_options(&self) -> Option<&str> {
        self.get(INVESTMENT_OPTIONS)
    }

    /// Iterate artifacts in write order.
    pub fn artifacts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.artifacts.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Produce a new record extending this one with `update`.
    ///
    /// Structural union: every field in the update must be new. A field
    /// already present in the record fails with
    /// [`StateError::DuplicateWriter`] instead of overwriting.
    pub fn merged(&self, update: StateUpdate) -> Result<Self, StateError> {
        let mut next = self.clone();
        for (field, value) in update.fields {
            if next.artifacts.contains_key(&field) {
                return Err(StateError::DuplicateWriter { field });
            }
            next.artifacts.insert(field, value);
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fresh_state_carries_only_user_id() {
        let state = RunState::new("user_001");
        assert_eq!(state.user_id(), "user_001");
        assert!(state.analysis_result().is_none());
        assert!(state.budget_plan().is_none());
        assert!(state.investment_options().is_none());
    }

    #[test]
    fn merge_extends_without_mutating_original() {
        let state = RunState::new("user_001");
        let merged = state
            .merged(StateUpdate::single(ANALYSIS_RESULT, "the analysis"))
            .unwrap();

        assert!(state.analysis_result().is_none());
        assert_eq!(merged.analysis_result(), Some("the analysis"));
        assert_eq!(merged.user_id(), "user_001");
    }

    #[test]
    fn merge_rejects_second_writer() {
        let state = RunState::new("user_001")
            .merged(StateUpdate::single(ANALYSIS_RESULT, "first"))
            .unwrap();

        let result = state.merged(StateUpdate::single(ANALYSIS_RESULT, "second"));
        match result {
            Err(StateError::DuplicateWriter { field }) => assert_eq!(field, ANALYSIS_RESULT),
            other => panic!("expected duplicate writer, got {other:?}"),
        }
        // original untouched
        assert_eq!(state.analysis_result(), Some("first"));
    }

    #[test]
    fn artifacts_iterate_in_write_order() {
        let state = RunState::new("u")
            .merged(StateUpdate::single(ANALYSIS_RESULT, "a"))
            .unwrap()
            .merged(StateUpdate::single(BUDGET_PLAN, "b"))
            .unwrap()
            .merged(StateUpdate::single(INVESTMENT_OPTIONS, "c"))
            .unwrap();

        let order: Vec<&str> = state.artifacts().map(|(k, _)| k).collect();
        assert_eq!(order, vec![ANALYSIS_RESULT, BUDGET_PLAN, INVESTMENT_OPTIONS]);
    }

    #[test]
    fn multi_field_update_merges_atomically() {
        let update = StateUpdate::new()
            .with("a", "1")
            .with("b", "2");
        assert!(!update.is_empty());

        let state = RunState::new("u").merged(update).unwrap();
        assert_eq!(state.get("a"), Some("1"));
        assert_eq!(state.get("b"), Some("2"));
    }
}
