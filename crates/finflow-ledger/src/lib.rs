//! FinFlow Ledger - transaction history collaborator
//!
//! Provides the interface the pipeline uses to resolve a user's
//! transaction history:
//! - The `LedgerSource` trait (async lookup by user id)
//! - The `Transaction` record and derived `Metrics`
//! - An HTTP-backed client for a remote ledger service
//! - An in-memory fixture implementation for tests and demos
//!
//! Lookup failure and "no records found" are deliberately close cousins:
//! callers are expected to treat both as an empty history rather than a
//! fatal condition.

#![warn(unreachable_pub)]

pub mod fixture;
pub mod http;
pub mod metrics;
pub mod source;
pub mod transaction;

pub use fixture::{FixtureLedger, DEMO_USERS};
pub use http::HttpLedger;
pub use metrics::{format_usd, Metrics};
pub use source::{LedgerError, LedgerSource};
pub use transaction::Transaction;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
