//! FinFlow command line.
//!
//! Presentation layer over the pipeline: loads configuration from the
//! environment, runs the three-stage chain for a user, extracts the
//! headline metrics from the analysis artifact, and renders the three
//! markdown artifacts to stdout.

use anyhow::{bail, Context};
use clap::{Arg, ArgAction, Command};
use finflow_ledger::{FixtureLedger, HttpLedger, LedgerSource, DEMO_USERS};
use finflow_llm::{GeminiClient, TextGenerator};
use finflow_pipeline::report::extract_metrics;
use finflow_pipeline::{PipelineConfig, PipelineRunner, RunState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Command::new("finflow")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Three-stage financial analysis pipeline")
        .subcommand_required(true)
        .subcommand(
            Command::new("run")
                .about("Run the pipeline for a user")
                .arg(
                    Arg::new("user")
                        .long("user")
                        .required(true)
                        .help("User id to analyze"),
                )
                .arg(
                    Arg::new("ledger-url")
                        .long("ledger-url")
                        .help("Remote ledger base URL (defaults to the built-in demo ledger)"),
                )
                .arg(
                    Arg::new("model")
                        .long("model")
                        .help("Gemini model name (defaults to gemini-1.5-pro-latest)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the final state record as JSON"),
                ),
        )
        .subcommand(Command::new("users").about("List the demo user roster"));

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("run", sub)) => {
            let user_id = sub
                .get_one::<String>("user")
                .context("--user is required")?;
            let ledger_url = sub.get_one::<String>("ledger-url");
            let model = sub.get_one::<String>("model");
            let as_json = sub.get_flag("json");

            run_pipeline(user_id, ledger_url, model, as_json).await
        }
        Some(("users", _)) => {
            for user in DEMO_USERS {
                println!("{user}");
            }
            Ok(())
        }
        _ => unreachable!("subcommand required"),
    }
}

async fn run_pipeline(
    user_id: &str,
    ledger_url: Option<&String>,
    model: Option<&String>,
    as_json: bool,
) -> anyhow::Result<()> {
    // Configuration failures abort before any run begins.
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => bail!("GEMINI_API_KEY is not set; refusing to start"),
    };

    let ledger: Arc<dyn LedgerSource> = match ledger_url {
        Some(url) => Arc::new(HttpLedger::new(url.clone())),
        None => Arc::new(FixtureLedger::demo()),
    };

    let mut client = GeminiClient::new(api_key);
    if let Some(model) = model {
        client = client.with_model(model.clone());
    }
    let generator: Arc<dyn TextGenerator> = Arc::new(client);

    let runner = PipelineRunner::standard(PipelineConfig::new(), ledger, generator);

    tracing::info!(%user_id, "starting analysis");
    let state = runner
        .run(user_id)
        .await
        .with_context(|| format!("pipeline run failed for {user_id}"))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    print!("{}", render(&state));
    Ok(())
}

/// Render the final record: headline metrics first, then each artifact.
fn render(state: &RunState) -> String {
    let mut out = String::new();
    out.push_str(&format!("# FinFlow report for {}\n\n", state.user_id()));

    match state.analysis_result().and_then(extract_metrics) {
        Some(metrics) => {
            out.push_str(&format!(
                "Total Income: {}\n",
                finflow_ledger::format_usd(metrics.total_income)
            ));
            out.push_str(&format!(
                "Total Spending: {}\n",
                finflow_ledger::format_usd(metrics.total_spending.abs())
            ));
            let direction = if metrics.net_flow < 0.0 { "negative" } else { "positive" };
            out.push_str(&format!(
                "Net Flow: {} ({direction})\n",
                finflow_ledger::format_usd(metrics.net_flow)
            ));
            if metrics.is_zero() {
                out.push_str("Note: no transactions on record; the analysis below is informational only.\n");
            }
        }
        None => out.push_str("Headline metrics unavailable.\n"),
    }
    out.push('\n');

    for (field, text) in state.artifacts() {
        out.push_str(&format!("## {field}\n\n{text}\n\n"));
    }
    out
}
