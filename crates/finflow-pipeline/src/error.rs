//! Error types for the pipeline.
//!
//! Propagation policy: ledger lookup failures are absorbed inside the
//! analyzer and never reach these types; generation failures abort the run
//! with the failing stage named; the step budget is a structural guard
//! against future cyclic graph extensions.

use crate::state::StateError;
use finflow_llm::GenerationError;

/// Failure of a single stage.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// The text generation call failed
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// The stage's input field was not yet populated
    ///
    /// Indicates a mis-ordered graph; unreachable in the standard chain.
    #[error("missing input field: {field}")]
    MissingInput {
        /// The field the stage expected to read
        field: String,
    },

    /// Serializing a stage artifact failed
    #[error("artifact serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure of a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The caller supplied an empty user id
    #[error("user id must be non-empty")]
    InvalidUserId,

    /// A stage failed; no later stage ran
    #[error("stage '{stage}' failed: {source}")]
    Stage {
        /// Name of the failing stage
        stage: String,
        /// The underlying stage failure
        #[source]
        source: StageError,
    },

    /// A stage's update collided with an already-written field
    #[error("merging update from stage '{stage}' failed: {source}")]
    Merge {
        /// Name of the stage whose update could not be merged
        stage: String,
        /// The underlying merge failure
        #[source]
        source: StateError,
    },

    /// The node-visit budget was exhausted
    ///
    /// Unreachable with the fixed three-node chain; guards future
    /// extensions that might introduce cycles.
    #[error("step budget exceeded: {budget} node visits")]
    StepBudgetExceeded {
        /// The configured maximum number of node visits
        budget: usize,
    },
}

impl PipelineError {
    /// Name of the failing stage, when the failure is stage-scoped.
    #[must_use]
    pub fn failing_stage(&self) -> Option<&str> {
        match self {
            Self::Stage { stage, .. } | Self::Merge { stage, .. } => Some(stage),
            _ => None,
        }
    }
}
