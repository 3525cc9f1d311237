//! Transaction records as returned by a ledger source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single ledger entry for a user.
///
/// Amounts are signed: positive for income, negative for spending.
/// Transactions carry no identity beyond their position in the sequence
/// returned for a user (most recent first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Calendar date of the transaction
    pub date: NaiveDate,
    /// Free-text description
    pub description: String,
    /// Signed amount: positive = income, negative = spending
    pub amount: f64,
    /// Category label (e.g. "Groceries", "Salary")
    pub category: String,
    /// Originating bank label
    pub bank_name: String,
}

impl Transaction {
    /// Create a new transaction.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        bank_name: impl Into<String>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            category: category.into(),
            bank_name: bank_name.into(),
        }
    }

    /// Whether this entry is income (strictly positive amount).
    #[inline]
    #[must_use]
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Whether this entry is spending (strictly negative amount).
    #[inline]
    #[must_use]
    pub fn is_spending(&self) -> bool {
        self.amount < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn transaction_sign_classification() {
        let salary = Transaction::new(date("2025-07-01"), "Salary", 2500.0, "Income", "Chase");
        let rent = Transaction::new(date("2025-07-02"), "Rent", -800.0, "Housing", "Chase");

        assert!(salary.is_income());
        assert!(!salary.is_spending());
        assert!(rent.is_spending());
        assert!(!rent.is_income());
    }

    #[test]
    fn transaction_serde_round_trip() {
        let txn = Transaction::new(date("2025-07-03"), "Groceries", -54.2, "Food", "Ally");
        let json = serde_json::to_string(&txn).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn, back);
    }
}
