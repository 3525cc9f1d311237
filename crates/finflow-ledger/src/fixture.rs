//! In-memory ledger fixture for tests and demos.

use crate::source::{LedgerError, LedgerSource};
use crate::transaction::Transaction;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// The demo user roster served by [`FixtureLedger::demo`].
pub const DEMO_USERS: [&str; 5] = ["user_001", "user_002", "user_003", "user_004", "user_005"];

/// In-memory ledger source.
///
/// Users not present in the fixture resolve to an empty history, mirroring
/// how a real ledger answers for a user with no recorded transactions.
/// Can be switched into a failing mode to exercise lookup-failure paths.
pub struct FixtureLedger {
    histories: HashMap<String, Vec<Transaction>>,
    failing: AtomicBool,
    call_count: AtomicU32,
}

impl FixtureLedger {
    /// Create an empty fixture.
    #[must_use]
    pub fn new() -> Self {
        Self {
            histories: HashMap::new(),
            failing: AtomicBool::new(false),
            call_count: AtomicU32::new(0),
        }
    }

    /// Fixture preloaded with the demo roster.
    ///
    /// `user_001` carries the canonical three-transaction history;
    /// the remaining demo users get small plausible histories.
    #[must_use]
    pub fn demo() -> Self {
        let mut fixture = Self::new();

        fixture = fixture.with_history(
            "user_001",
            vec![
                txn("2025-07-28", "Monthly salary", 2500.0, "Income", "Chase"),
                txn("2025-07-25", "Apartment rent", -800.0, "Housing", "Chase"),
                txn("2025-07-20", "Groceries and utilities", -300.5, "Living", "Chase"),
            ],
        );
        fixture = fixture.with_history(
            "user_002",
            vec![
                txn("2025-07-27", "Freelance invoice", 1800.0, "Income", "Ally"),
                txn("2025-07-22", "Car insurance", -120.0, "Insurance", "Ally"),
                txn("2025-07-15", "Streaming subscription", -15.99, "Entertainment", "Ally"),
            ],
        );
        fixture = fixture.with_history(
            "user_003",
            vec![
                txn("2025-07-26", "Paycheck", 3200.0, "Income", "Wells Fargo"),
                txn("2025-07-24", "Mortgage", -1450.0, "Housing", "Wells Fargo"),
                txn("2025-07-18", "Dining out", -86.4, "Food", "Wells Fargo"),
            ],
        );
        fixture = fixture.with_history(
            "user_004",
            vec![
                txn("2025-07-21", "Part-time wages", 950.0, "Income", "Chime"),
                txn("2025-07-19", "Textbooks", -210.75, "Education", "Chime"),
            ],
        );
        // user_005 is on the roster but has no recorded transactions
        fixture.with_history("user_005", Vec::new())
    }

    /// Add or replace the history for a user.
    #[must_use]
    pub fn with_history(mut self, user_id: impl Into<String>, history: Vec<Transaction>) -> Self {
        self.histories.insert(user_id.into(), history);
        self
    }

    /// Toggle failing mode: every lookup returns `LedgerError::Unreachable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of lookups performed.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for FixtureLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerSource for FixtureLedger {
    async fn transactions(&self, user_id: &str) -> Result<Vec<Transaction>, LedgerError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(LedgerError::Unreachable("fixture in failing mode".to_string()));
        }

        Ok(self.histories.get(user_id).cloned().unwrap_or_default())
    }
}

fn txn(date: &str, description: &str, amount: f64, category: &str, bank: &str) -> Transaction {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap_or_default();
    Transaction::new(date, description, amount, category, bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metrics;

    #[tokio::test]
    async fn fixture_known_user() {
        let ledger = FixtureLedger::demo();
        let history = ledger.transactions("user_001").await.unwrap();

        assert_eq!(history.len(), 3);
        let m = Metrics::compute(&history);
        assert!((m.total_income - 2500.0).abs() < 1e-9);
        assert!((m.net_flow - 1399.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn fixture_unknown_user_is_empty() {
        let ledger = FixtureLedger::demo();
        let history = ledger.transactions("user_999").await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn fixture_failing_mode() {
        let ledger = FixtureLedger::demo();
        ledger.set_failing(true);

        let result = ledger.transactions("user_001").await;
        assert!(matches!(result, Err(LedgerError::Unreachable(_))));
        assert_eq!(ledger.call_count(), 1);
    }
}
