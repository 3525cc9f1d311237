//! The stage trait: one node of the pipeline.

use crate::error::StageError;
use crate::state::{RunState, StateUpdate};
use async_trait::async_trait;

/// One node in the pipeline.
///
/// A stage is a function from the current shared state to a partial update.
/// Stages read only fields written by strictly earlier stages (plus the
/// user id) and write only their own fields; the runner enforces the
/// one-writer-per-field rule at merge time.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Stable stage name, used in logs and failure reports.
    fn name(&self) -> &'static str;

    /// Run the stage against the current state.
    async fn run(&self, state: &RunState) -> Result<StateUpdate, StageError>;
}
