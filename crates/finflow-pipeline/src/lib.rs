//! FinFlow Pipeline - the sequential agent pipeline
//!
//! The core of the system: a fixed-order chain of three stages threading a
//! shared state record from a user id to three narrative artifacts:
//! - analyzer: transaction metrics plus a financial analysis
//! - budgetor: a budget plan derived from the analysis
//! - investor: investment suggestions derived from the budget plan
//!
//! Each stage is a function from the current state to a partial update; the
//! runner merges updates into a fresh record per step (structural union,
//! one writer per field) and returns the final record. The node sequence is
//! data, not control flow: appending a fourth stage is a one-line change.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use finflow_ledger::FixtureLedger;
//! use finflow_llm::GeminiClient;
//! use finflow_pipeline::{PipelineConfig, PipelineRunner};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ledger = Arc::new(FixtureLedger::demo());
//! let generator = Arc::new(GeminiClient::new("api-key"));
//! let runner = PipelineRunner::standard(PipelineConfig::new(), ledger, generator);
//!
//! let state = runner.run("user_001").await?;
//! println!("{}", state.analysis_result().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod prompts;
pub mod report;
pub mod runner;
pub mod stage;
pub mod stages;
pub mod state;

pub use error::{PipelineError, StageError};
pub use runner::{PipelineConfig, PipelineRunner};
pub use stage::Stage;
pub use stages::{Analyzer, Budgetor, Investor};
pub use state::{RunState, StateError, StateUpdate};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
