//! The pipeline runner: node sequence as data, structural merge per step.

use crate::error::PipelineError;
use crate::stage::Stage;
use crate::stages::{Analyzer, Budgetor, Investor};
use crate::state::RunState;
use finflow_ledger::LedgerSource;
use finflow_llm::TextGenerator;
use std::sync::Arc;

/// Runner configuration.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Maximum number of node visits per run.
    ///
    /// The fixed three-node chain never approaches this; the budget guards
    /// future graph extensions against accidental cycles.
    pub max_node_visits: usize,
}

impl PipelineConfig {
    /// Create the default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the node-visit budget.
    #[inline]
    #[must_use]
    pub fn with_max_node_visits(mut self, budget: usize) -> Self {
        self.max_node_visits = budget;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { max_node_visits: 12 }
    }
}

/// Runs an ordered sequence of stages over a shared state record.
///
/// The sequence is data: stages run in insertion order, each returning a
/// partial update the runner merges into a fresh record. A stage failure
/// aborts the run immediately with the failing stage named; the fields of
/// later stages remain unset and no partial result is reported.
pub struct PipelineRunner {
    config: PipelineConfig,
    stages: Vec<Box<dyn Stage>>,
}

impl PipelineRunner {
    /// Create a runner with no stages.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            stages: Vec::new(),
        }
    }

    /// The standard three-stage chain: analyzer, budgetor, investor.
    #[must_use]
    pub fn standard(
        config: PipelineConfig,
        ledger: Arc<dyn LedgerSource>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self::new(config)
            .with_stage(Box::new(Analyzer::new(ledger, generator.clone())))
            .with_stage(Box::new(Budgetor::new(generator.clone())))
            .with_stage(Box::new(Investor::new(generator)))
    }

    /// Append a stage to the sequence. This is the extension point:
    /// a fourth node is one more call.
    #[must_use]
    pub fn with_stage(mut self, stage: Box<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Stage names in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Execute a full run for `user_id`.
    ///
    /// Returns the final state record with every stage's field populated,
    /// or the first failure. Stages are never retried.
    pub async fn run(&self, user_id: &str) -> Result<RunState, PipelineError> {
        if user_id.trim().is_empty() {
            return Err(PipelineError::InvalidUserId);
        }

        tracing::info!(%user_id, stages = self.stages.len(), "pipeline run starting");
        let mut state = RunState::new(user_id);
        let mut visits = 0usize;

        for stage in &self.stages {
            visits += 1;
            if visits > self.config.max_node_visits {
                return Err(PipelineError::StepBudgetExceeded {
                    budget: self.config.max_node_visits,
                });
            }

            tracing::info!(stage = stage.name(), "stage running");
            let update = stage.run(&state).await.map_err(|source| {
                tracing::error!(stage = stage.name(), error = %source, "stage failed");
                PipelineError::Stage {
                    stage: stage.name().to_string(),
                    source,
                }
            })?;

            state = state.merged(update).map_err(|source| PipelineError::Merge {
                stage: stage.name().to_string(),
                source,
            })?;
            tracing::info!(stage = stage.name(), "stage merged");
        }

        tracing::info!(%user_id, "pipeline run complete");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StageError;
    use crate::state::StateUpdate;
    use async_trait::async_trait;
    use finflow_ledger::FixtureLedger;
    use finflow_llm::MockGenerator;

    struct FixedStage {
        name: &'static str,
        field: &'static str,
    }

    #[async_trait]
    impl Stage for FixedStage {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn run(&self, _state: &RunState) -> Result<StateUpdate, StageError> {
            Ok(StateUpdate::single(self.field, "out"))
        }
    }

    #[tokio::test]
    async fn standard_chain_has_three_named_stages() {
        let runner = PipelineRunner::standard(
            PipelineConfig::new(),
            Arc::new(FixtureLedger::demo()),
            Arc::new(MockGenerator::default()),
        );

        assert_eq!(runner.stage_names(), vec!["analyzer", "budgetor", "investor"]);
    }

    #[tokio::test]
    async fn empty_user_id_is_rejected_before_any_stage() {
        let runner = PipelineRunner::standard(
            PipelineConfig::new(),
            Arc::new(FixtureLedger::demo()),
            Arc::new(MockGenerator::default()),
        );

        let result = runner.run("  ").await;
        assert!(matches!(result, Err(PipelineError::InvalidUserId)));
    }

    #[tokio::test]
    async fn step_budget_aborts_oversized_graphs() {
        let mut runner = PipelineRunner::new(PipelineConfig::new().with_max_node_visits(2));
        for (name, field) in [("a", "f1"), ("b", "f2"), ("c", "f3")] {
            runner = runner.with_stage(Box::new(FixedStage { name, field }));
        }

        let result = runner.run("user_001").await;
        match result {
            Err(PipelineError::StepBudgetExceeded { budget }) => assert_eq!(budget, 2),
            other => panic!("expected budget exhaustion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_field_from_extension_stage_fails_merge() {
        let runner = PipelineRunner::new(PipelineConfig::new())
            .with_stage(Box::new(FixedStage { name: "first", field: "shared" }))
            .with_stage(Box::new(FixedStage { name: "second", field: "shared" }));

        let result = runner.run("user_001").await;
        match result {
            Err(PipelineError::Merge { stage, .. }) => assert_eq!(stage, "second"),
            other => panic!("expected merge failure, got {other:?}"),
        }
    }
}
