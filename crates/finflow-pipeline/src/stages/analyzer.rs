//! Analyzer stage: transaction metrics plus narrative analysis.

use crate::error::StageError;
use crate::prompts::{ANALYZER_HUMAN, ANALYZER_SYSTEM};
use crate::report::{metrics_block, strip_marker_line};
use crate::stage::Stage;
use crate::state::{RunState, StateUpdate, ANALYSIS_RESULT};
use async_trait::async_trait;
use finflow_ledger::{format_usd, LedgerSource, Metrics, Transaction};
use finflow_llm::{ChatPrompt, TextGenerator};
use std::sync::Arc;

/// First stage: resolves the user's transaction history, computes headline
/// metrics, and asks the generator for a structured markdown analysis.
///
/// The ledger is queried directly. Lookup failure is downgraded to an
/// empty history: the stage still produces a valid (degenerate) analysis
/// and the run proceeds. Only a generation failure fails the stage.
pub struct Analyzer {
    ledger: Arc<dyn LedgerSource>,
    generator: Arc<dyn TextGenerator>,
}

impl Analyzer {
    /// Create the analyzer stage.
    #[must_use]
    pub fn new(ledger: Arc<dyn LedgerSource>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { ledger, generator }
    }

    async fn resolve_history(&self, user_id: &str) -> Vec<Transaction> {
        match self.ledger.transactions(user_id).await {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "ledger lookup failed, treating as empty history");
                Vec::new()
            }
        }
    }

    fn summary_seed(history: &[Transaction]) -> String {
        if history.is_empty() {
            return "No transactions found for this user.".to_string();
        }

        let largest = history
            .iter()
            .map(|t| t.amount)
            .fold(f64::NEG_INFINITY, f64::max);
        let smallest = history
            .iter()
            .map(|t| t.amount)
            .fold(f64::INFINITY, f64::min);

        format!(
            "User has {} transactions. Largest transaction: {}, smallest transaction: {}.",
            history.len(),
            format_usd(largest),
            format_usd(smallest),
        )
    }
}

#[async_trait]
impl Stage for Analyzer {
    fn name(&self) -> &'static str {
        "analyzer"
    }

    async fn run(&self, state: &RunState) -> Result<StateUpdate, StageError> {
        let history = self.resolve_history(state.user_id()).await;
        let metrics = Metrics::compute(&history);
        let summary = Self::summary_seed(&history);

        let prompt = ChatPrompt::from_template(
            ANALYZER_SYSTEM,
            ANALYZER_HUMAN,
            &[
                ("total_income", format_usd(metrics.total_income).as_str()),
                ("total_spending", format_usd(metrics.total_spending).as_str()),
                ("net_flow", format_usd(metrics.net_flow).as_str()),
                ("summary", summary.as_str()),
            ],
        );

        let generation = self.generator.generate(&prompt).await?;
        let narrative = strip_marker_line(&generation.text);
        let block = metrics_block(&metrics)?;

        Ok(StateUpdate::single(
            ANALYSIS_RESULT,
            format!("{block}\n\n{narrative}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::extract_metrics;
    use finflow_ledger::FixtureLedger;
    use finflow_llm::MockGenerator;

    fn analyzer_with(ledger: FixtureLedger, generator: MockGenerator) -> Analyzer {
        Analyzer::new(Arc::new(ledger), Arc::new(generator))
    }

    #[tokio::test]
    async fn non_empty_history_embeds_computed_metrics() {
        let stage = analyzer_with(
            FixtureLedger::demo(),
            MockGenerator::new("# Metrics Summary\n\nnarrative"),
        );

        let update = stage.run(&RunState::new("user_001")).await.unwrap();
        let state = RunState::new("user_001").merged(update).unwrap();
        let analysis = state.analysis_result().unwrap();

        let metrics = extract_metrics(analysis).unwrap();
        assert!((metrics.total_income - 2500.0).abs() < 1e-9);
        assert!((metrics.total_spending + 1100.5).abs() < 1e-9);
        assert!((metrics.net_flow - 1399.5).abs() < 1e-9);
        assert!(analysis.contains("narrative"));
    }

    #[tokio::test]
    async fn empty_history_takes_degenerate_path() {
        let generator = MockGenerator::new("No activity to analyze.");
        let stage = Analyzer::new(Arc::new(FixtureLedger::demo()), Arc::new(generator));

        let update = stage.run(&RunState::new("user_999")).await.unwrap();
        let state = RunState::new("user_999").merged(update).unwrap();

        let metrics = extract_metrics(state.analysis_result().unwrap()).unwrap();
        assert!(metrics.is_zero());
    }

    #[tokio::test]
    async fn ledger_failure_is_absorbed() {
        let ledger = FixtureLedger::demo();
        ledger.set_failing(true);
        let stage = Analyzer::new(
            Arc::new(ledger),
            Arc::new(MockGenerator::new("degenerate narrative")),
        );

        let update = stage.run(&RunState::new("user_001")).await.unwrap();
        assert!(!update.is_empty());
    }

    #[tokio::test]
    async fn generation_failure_fails_the_stage() {
        let generator = MockGenerator::default().then_fail("quota exhausted");
        let stage = Analyzer::new(Arc::new(FixtureLedger::demo()), Arc::new(generator));

        let result = stage.run(&RunState::new("user_001")).await;
        assert!(matches!(result, Err(StageError::Generation(_))));
    }

    #[tokio::test]
    async fn prompt_carries_extremes_for_non_empty_history() {
        let generator = Arc::new(MockGenerator::default());
        let stage = Analyzer::new(Arc::new(FixtureLedger::demo()), generator.clone());

        stage.run(&RunState::new("user_001")).await.unwrap();

        let prompt = &generator.received()[0];
        let human = prompt.human().unwrap();
        assert!(human.contains("Largest transaction: $2,500.00"));
        assert!(human.contains("smallest transaction: -$800.00"));
    }

    #[tokio::test]
    async fn stray_marker_line_is_stripped() {
        let generator = MockGenerator::new("json {\"x\": 1}\n# Executive Summary\n\nBody");
        let stage = Analyzer::new(Arc::new(FixtureLedger::demo()), Arc::new(generator));

        let update = stage.run(&RunState::new("user_001")).await.unwrap();
        let state = RunState::new("user_001").merged(update).unwrap();
        let analysis = state.analysis_result().unwrap();

        // metrics block survives, marker line does not
        assert!(analysis.starts_with("```json"));
        assert!(analysis.contains("# Executive Summary"));
        assert!(!analysis.contains("json {\"x\": 1}"));
    }
}
