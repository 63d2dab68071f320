//! The wallet seam: an external signer behind a trait, a per-connection
//! session object, and the mapping from free-text signer errors to the
//! user-facing error categories.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::payload::EntryFunctionPayload;
use crate::validate::validate_address;
use crate::{ClientError, Result};

/// What the external signer returns on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedTransaction {
    pub hash: String,
}

/// Free-text error from the external wallet. Wallets do not expose
/// structured codes, so this is all we get to classify from.
#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct SignerError(pub String);

/// External wallet that signs and submits an entry-function payload.
///
/// A call may suspend indefinitely while the user decides in the wallet
/// app; there is no programmatic cancellation once submission starts.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign_and_submit(
        &self,
        payload: &EntryFunctionPayload,
    ) -> std::result::Result<SubmittedTransaction, SignerError>;
}

/// Map a raw signer error message onto the user-facing taxonomy.
///
/// Substring matching against free text is all the wallet contract gives
/// us; the match order is load-bearing and must not change.
pub fn classify_signer_error(raw: &str) -> ClientError {
    if raw.contains("insufficient balance") {
        ClientError::InsufficientBalance
    } else if raw.contains("network") {
        ClientError::NetworkFailure
    } else if raw.contains("rejected") {
        ClientError::SigningRejected
    } else {
        ClientError::UnknownFailure(raw.to_string())
    }
}

/// A connected wallet: the account address plus the signer, acquired on
/// connect and carried explicitly into every flow that signs. Dropped (or
/// [`WalletSession::disconnect`]ed) when the wallet goes away.
pub struct WalletSession<S> {
    account: String,
    signer: S,
}

impl<S: TransactionSigner> WalletSession<S> {
    /// Open a session for a connected account. The account address must
    /// have the standard shape.
    pub fn connect(account: impl Into<String>, signer: S) -> Result<Self> {
        let account = account.into();
        validate_address(&account)?;
        tracing::info!(account = %account, "wallet session opened");
        Ok(Self { account, signer })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Hand a payload to the wallet and interpret the outcome. The raw
    /// error text is logged here; callers only ever see the classified
    /// category.
    pub async fn sign_and_submit(
        &self,
        payload: &EntryFunctionPayload,
    ) -> Result<SubmittedTransaction> {
        match self.signer.sign_and_submit(payload).await {
            Ok(submitted) if submitted.hash.is_empty() => {
                tracing::error!(function = %payload.function, "signer returned no transaction hash");
                Err(ClientError::UnknownFailure(
                    "no transaction hash received".to_string(),
                ))
            }
            Ok(submitted) => {
                tracing::info!(function = %payload.function, hash = %submitted.hash, "transaction submitted");
                Ok(submitted)
            }
            Err(e) => {
                tracing::error!(function = %payload.function, raw = %e.0, "signer returned an error");
                Err(classify_signer_error(&e.0))
            }
        }
    }

    /// Release the session.
    pub fn disconnect(self) {
        tracing::info!(account = %self.account, "wallet session closed");
    }
}
