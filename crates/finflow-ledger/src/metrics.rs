//! Metrics derived from a transaction sequence.
//!
//! A pure function of the transactions: recomputable at any time, never
//! persisted separately.

use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Headline metrics for a transaction history.
///
/// Deserialization is lenient: missing fields default to zero, matching
/// how display code reads the embedded metrics block.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    /// Sum of all positive amounts
    pub total_income: f64,
    /// Sum of all negative amounts (itself negative, or zero)
    pub total_spending: f64,
    /// total_income + total_spending
    pub net_flow: f64,
}

impl Metrics {
    /// Compute metrics from a transaction sequence.
    ///
    /// An empty sequence yields all-zero metrics.
    #[must_use]
    pub fn compute(transactions: &[Transaction]) -> Self {
        let total_income: f64 = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let total_spending: f64 = transactions
            .iter()
            .filter(|t| t.is_spending())
            .map(|t| t.amount)
            .sum();

        Self {
            total_income,
            total_spending,
            net_flow: total_income + total_spending,
        }
    }

    /// All-zero metrics, used for the no-transactions path.
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Whether these are the degenerate all-zero metrics.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.total_income == 0.0 && self.total_spending == 0.0 && self.net_flow == 0.0
    }
}

/// Format an amount as US dollars with thousands separators, e.g. `$1,234.56`.
///
/// Negative amounts keep their sign ahead of the dollar symbol: `-$800.00`.
#[must_use]
pub fn format_usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}.{frac:02}")
    } else {
        format!("${grouped}.{frac:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn txn(amount: f64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            "test",
            amount,
            "Misc",
            "Chase",
        )
    }

    #[test]
    fn metrics_empty_is_zero() {
        let m = Metrics::compute(&[]);
        assert_eq!(m, Metrics::zero());
        assert!(m.is_zero());
    }

    #[test]
    fn metrics_income_and_spending() {
        let m = Metrics::compute(&[txn(2500.0), txn(-800.0), txn(-300.5)]);
        assert!((m.total_income - 2500.0).abs() < 1e-9);
        assert!((m.total_spending + 1100.5).abs() < 1e-9);
        assert!((m.net_flow - 1399.5).abs() < 1e-9);
    }

    #[test]
    fn metrics_zero_amount_is_neither() {
        let m = Metrics::compute(&[txn(0.0)]);
        assert!(m.is_zero());
    }

    #[test]
    fn format_usd_grouping() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(2500.0), "$2,500.00");
        assert_eq!(format_usd(-1100.5), "-$1,100.50");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
    }
}
