//! HTTP-backed ledger source.
//!
//! Talks to a remote ledger service exposing
//! `GET {base_url}/users/{user_id}/transactions` returning a JSON array of
//! transactions, most recent first.

use crate::source::{LedgerError, LedgerSource};
use crate::transaction::Transaction;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Ledger source backed by a remote HTTP service.
pub struct HttpLedger {
    client: Client,
    base_url: String,
}

impl HttpLedger {
    /// Create a client for the ledger service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Use a preconfigured `reqwest::Client` (shared connection pool).
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn transactions_url(&self, user_id: &str) -> String {
        format!(
            "{}/users/{}/transactions",
            self.base_url.trim_end_matches('/'),
            user_id
        )
    }
}

#[async_trait]
impl LedgerSource for HttpLedger {
    async fn transactions(&self, user_id: &str) -> Result<Vec<Transaction>, LedgerError> {
        let url = self.transactions_url(user_id);
        tracing::debug!(%url, "fetching transactions");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LedgerError::Unreachable(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(LedgerError::UnknownUser(user_id.to_string())),
            status if !status.is_success() => Err(LedgerError::Unreachable(format!(
                "ledger returned {status} for {url}"
            ))),
            _ => response
                .json::<Vec<Transaction>>()
                .await
                .map_err(|e| LedgerError::MalformedResponse(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transactions_url_joins_cleanly() {
        let ledger = HttpLedger::new("http://ledger.local/");
        assert_eq!(
            ledger.transactions_url("user_001"),
            "http://ledger.local/users/user_001/transactions"
        );
    }
}
