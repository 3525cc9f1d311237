//! The three standard stages.

mod analyzer;
mod budgetor;
mod investor;

pub use analyzer::Analyzer;
pub use budgetor::Budgetor;
pub use investor::Investor;
