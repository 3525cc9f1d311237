//! Budgetor stage: budget plan derived from the analysis.

use crate::error::StageError;
use crate::prompts::{BUDGETOR_HUMAN, BUDGETOR_SYSTEM};
use crate::stage::Stage;
use crate::state::{RunState, StateUpdate, ANALYSIS_RESULT, BUDGET_PLAN};
use async_trait::async_trait;
use finflow_llm::{ChatPrompt, TextGenerator};
use std::sync::Arc;

/// Second stage: embeds the analysis verbatim and asks the generator for a
/// 50/30/20 budget plan rendered as a markdown table.
///
/// No numeric computation happens here: the budget figures are advisory
/// prose produced by the generator, not machine-validated numbers.
pub struct Budgetor {
    generator: Arc<dyn TextGenerator>,
}

impl Budgetor {
    /// Create the budgetor stage.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Stage for Budgetor {
    fn name(&self) -> &'static str {
        "budgetor"
    }

    async fn run(&self, state: &RunState) -> Result<StateUpdate, StageError> {
        let analysis = state
            .analysis_result()
            .ok_or_else(|| StageError::MissingInput {
                field: ANALYSIS_RESULT.to_string(),
            })?;

        let prompt =
            ChatPrompt::from_template(BUDGETOR_SYSTEM, BUDGETOR_HUMAN, &[("analysis", analysis)]);

        let generation = self.generator.generate(&prompt).await?;
        Ok(StateUpdate::single(BUDGET_PLAN, generation.text))
    }
}
