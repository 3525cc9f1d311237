//! The ledger source trait and its error type.

use crate::transaction::Transaction;
use async_trait::async_trait;

/// Errors from a ledger source lookup.
///
/// Callers in the pipeline treat every variant the same way as an empty
/// history: a lookup failure is never fatal to a run.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The ledger service could not be reached
    #[error("ledger unreachable: {0}")]
    Unreachable(String),

    /// The service answered but the response could not be decoded
    #[error("malformed ledger response: {0}")]
    MalformedResponse(String),

    /// The user id is not known to the ledger
    #[error("unknown user: {0}")]
    UnknownUser(String),
}

/// A source of transaction histories, keyed by user id.
///
/// Implementations must be safe for concurrent use by independent
/// pipeline runs (stateless request/response semantics).
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Resolve the transaction history for a user, most recent first.
    ///
    /// An empty vector is a valid answer and means the user has no
    /// recorded transactions.
    async fn transactions(&self, user_id: &str) -> Result<Vec<Transaction>, LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_error_display() {
        let err = LedgerError::Unreachable("connection refused".to_string());
        assert!(err.to_string().contains("ledger unreachable"));

        let err = LedgerError::UnknownUser("user_404".to_string());
        assert!(err.to_string().contains("user_404"));
    }
}
