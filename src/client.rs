//! Fullnode read interface: view calls for budget and loan state, plus
//! the last-known-value caches the UI renders from.
//!
//! Reads are best effort. A failed refresh is logged and the cached state
//! stays on screen; nothing on the read path is surfaced to the user.

use serde::{Deserialize, Serialize};

use crate::payload::{self, FN_GET_USER_LOANS_AS_BORROWER, FN_GET_USER_PROFILE};
use crate::{BudgetAllocation, ClientError, LoanRecord, Result};

/// Which fullnode to read from. The contract coordinates never change;
/// only this endpoint does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
}

impl Network {
    /// Unknown names fall back to testnet.
    pub fn parse(name: &str) -> Self {
        match name {
            "mainnet" => Network::Mainnet,
            "testnet" => Network::Testnet,
            "devnet" => Network::Devnet,
            _ => Network::Testnet,
        }
    }

    pub fn fullnode_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://fullnode.mainnet.aptoslabs.com/v1",
            Network::Testnet => "https://fullnode.testnet.aptoslabs.com/v1",
            Network::Devnet => "https://fullnode.devnet.aptoslabs.com/v1",
        }
    }
}

/// Profile resource as the view function returns it. Absent pieces stay
/// `None` and the caller keeps whatever it already had.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub budget: Option<BudgetAllocation>,
}

/// Thin reqwest wrapper for the fullnode view endpoint.
#[derive(Debug, Clone)]
pub struct FullnodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl FullnodeClient {
    pub fn new(network: Network) -> Self {
        Self::with_base_url(network.fullnode_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// POST a view request and decode the response body as `T`. Transport
    /// and decode failures both map to `NetworkFailure`.
    async fn view<T: serde::de::DeserializeOwned>(
        &self,
        function: &str,
        arguments: Vec<String>,
    ) -> Result<T> {
        let request = payload::entry_function(function, arguments);
        let response = self
            .http
            .post(format!("{}/view", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(function = %request.function, error = %e, "view request failed");
                ClientError::NetworkFailure
            })?;

        response.json().await.map_err(|e| {
            tracing::debug!(function = %request.function, error = %e, "view response unreadable");
            ClientError::NetworkFailure
        })
    }

    /// Fetch the profile (budget allocation) for one account.
    pub async fn get_user_profile(&self, account: &str) -> Result<UserProfile> {
        self.view(FN_GET_USER_PROFILE, vec![account.to_string()]).await
    }

    /// Fetch every loan the account holds as borrower.
    pub async fn get_user_loans_as_borrower(&self, account: &str) -> Result<Vec<LoanRecord>> {
        self.view(FN_GET_USER_LOANS_AS_BORROWER, vec![account.to_string()])
            .await
    }
}

/// Last-known budget allocation. Starts at the default allocation and
/// only ever changes on a successful read.
#[derive(Debug, Clone, Default)]
pub struct BudgetBoard {
    allocation: BudgetAllocation,
}

impl BudgetBoard {
    pub fn allocation(&self) -> &BudgetAllocation {
        &self.allocation
    }

    pub fn set_allocation(&mut self, allocation: BudgetAllocation) {
        self.allocation = allocation;
    }

    /// Re-read the allocation from chain. Failures keep the cache.
    pub async fn refresh(&mut self, client: &FullnodeClient, account: &str) {
        match client.get_user_profile(account).await {
            Ok(profile) => {
                if let Some(budget) = profile.budget {
                    self.allocation = budget;
                }
            }
            Err(e) => {
                tracing::warn!(account = %account, error = %e, "budget refresh failed, keeping cached allocation");
            }
        }
    }
}

/// Last-known loan list for the connected borrower.
#[derive(Debug, Clone, Default)]
pub struct LoanBook {
    loans: Vec<LoanRecord>,
}

impl LoanBook {
    pub fn loans(&self) -> &[LoanRecord] {
        &self.loans
    }

    /// Re-read the loan list from chain. Failures keep the cache.
    pub async fn refresh(&mut self, client: &FullnodeClient, account: &str) {
        match client.get_user_loans_as_borrower(account).await {
            Ok(loans) => self.loans = loans,
            Err(e) => {
                tracing::warn!(account = %account, error = %e, "loan refresh failed, keeping cached list");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_parse_defaults_to_testnet() {
        assert_eq!(Network::parse("mainnet"), Network::Mainnet);
        assert_eq!(Network::parse("devnet"), Network::Devnet);
        assert_eq!(Network::parse("testnet"), Network::Testnet);
        assert_eq!(Network::parse("localnet"), Network::Testnet);
        assert_eq!(Network::parse(""), Network::Testnet);
    }

    #[test]
    fn test_profile_without_budget_is_empty() {
        let profile: UserProfile = serde_json::from_str("{}").unwrap();
        assert!(profile.budget.is_none());
    }

    #[test]
    fn test_budget_board_keeps_cache_when_profile_has_no_budget() {
        let mut board = BudgetBoard::default();
        let cached = board.allocation().clone();

        let profile: UserProfile = serde_json::from_str("{}").unwrap();
        if let Some(budget) = profile.budget {
            board.set_allocation(budget);
        }
        assert_eq!(board.allocation(), &cached);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_cached_state() {
        // Nothing listens on the discard port, so both reads fail fast.
        let client = FullnodeClient::with_base_url("http://127.0.0.1:9");
        let account = format!("0x{}", "a".repeat(64));

        let mut board = BudgetBoard::default();
        board.refresh(&client, &account).await;
        assert_eq!(board.allocation(), &BudgetAllocation::default());

        let mut book = LoanBook::default();
        book.refresh(&client, &account).await;
        assert!(book.loans().is_empty());
    }
}
