//! Investor stage: investment suggestions derived from the budget plan.

use crate::error::StageError;
use crate::prompts::{INVESTOR_HUMAN, INVESTOR_SYSTEM};
use crate::stage::Stage;
use crate::state::{RunState, StateUpdate, BUDGET_PLAN, INVESTMENT_OPTIONS};
use async_trait::async_trait;
use finflow_llm::{ChatPrompt, TextGenerator};
use std::sync::Arc;

/// Third stage: embeds the budget plan and asks the generator for
/// beginner-friendly investment suggestions with a closing
/// not-financial-advice disclaimer.
///
/// The disclaimer is a prompt instruction, not a checked invariant.
pub struct Investor {
    generator: Arc<dyn TextGenerator>,
}

impl Investor {
    /// Create the investor stage.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Stage for Investor {
    fn name(&self) -> &'static str {
        "investor"
    }

    async fn run(&self, state: &RunState) -> Result<StateUpdate, StageError> {
        let budget = state.budget_plan().ok_or_else(|| StageError::MissingInput {
            field: BUDGET_PLAN.to_string(),
        })?;

        let prompt =
            ChatPrompt::from_template(INVESTOR_SYSTEM, INVESTOR_HUMAN, &[("budget", budget)]);

        let generation = self.generator.generate(&prompt).await?;
        Ok(StateUpdate::single(INVESTMENT_OPTIONS, generation.text))
    }
}
