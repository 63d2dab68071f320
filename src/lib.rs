pub mod client;
pub mod payload;
pub mod qr;
pub mod submit;
pub mod units;
pub mod validate;
pub mod wallet;

use serde::{Deserialize, Serialize};

/// Client version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Native coin symbol
pub const NATIVE_COIN: &str = "APT";

/// On-chain address of the Blocadamia contract. Fixed across networks;
/// switching networks only changes the fullnode endpoint.
pub const CONTRACT_ADDRESS: &str =
    "0x9f5c1bc6345eeb5c7ee48e51c46143b82dbea8af58484a6d76da16164e7d7316";

/// Move module that hosts every entry and view function we call.
pub const MODULE_NAME: &str = "blocadamia";

/// Smallest on-chain unit: 1 APT = 10^8 Octas.
pub const OCTAS_PER_APT: u64 = 100_000_000;

/// Interest rates are stored on-chain in basis points (1% = 100 bps).
pub const BASIS_POINTS_PER_PERCENT: u64 = 100;

/// Expected shape of an account address: "0x" prefix, 66 chars total.
pub const ADDRESS_PREFIX: &str = "0x";
pub const ADDRESS_LEN: usize = 66;

/// Blocadamia client errors
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("invalid recipient address {0:?}: expected a 66-character 0x address")]
    InvalidAddress(String),

    #[error("invalid amount {0:?}: enter a positive number")]
    InvalidAmount(String),

    #[error("not a valid number: {0:?}")]
    InvalidNumber(String),

    #[error("scanned code is not a valid payment QR")]
    MalformedCode(String),

    #[error("transaction rejected by wallet")]
    SigningRejected,

    #[error("network error, check your connection and try again")]
    NetworkFailure,

    #[error("insufficient balance to complete the transaction")]
    InsufficientBalance,

    // Raw signer text is carried for logging only, never displayed.
    #[error("transaction failed")]
    UnknownFailure(String),
}

/// Blocadamia client result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Budget allocation for one account: category percentages plus the total
/// budget in APT. Serde names follow the on-chain resource fields.
///
/// Percentages are not checked against each other; the contract accepts
/// allocations that do not sum to 100 and so do we.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    #[serde(rename = "food_percent", default)]
    pub food: u64,
    #[serde(rename = "rent_percent", default)]
    pub rent: u64,
    #[serde(rename = "travel_percent", default)]
    pub travel: u64,
    #[serde(rename = "entertainment_percent", default)]
    pub entertainment: u64,
    #[serde(rename = "education_percent", default)]
    pub education: u64,
    #[serde(rename = "other_percent", default)]
    pub other: u64,
    #[serde(rename = "total_budget", default)]
    pub total: u64,
}

impl BudgetAllocation {
    /// Sum of the category percentages, for display only.
    pub fn allocation_total(&self) -> u64 {
        self.food + self.rent + self.travel + self.entertainment + self.education + self.other
    }
}

impl Default for BudgetAllocation {
    fn default() -> Self {
        Self {
            food: 30,
            rent: 40,
            travel: 10,
            entertainment: 10,
            education: 5,
            other: 5,
            total: 1000,
        }
    }
}

/// One loan as returned by the contract. Fields are read optimistically;
/// anything the node omits defaults to zero/empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    #[serde(default)]
    pub id: u64,
    /// Principal in whole APT.
    #[serde(default)]
    pub amount: u64,
    /// Interest rate in basis points.
    #[serde(default)]
    pub interest_rate: u64,
    #[serde(default)]
    pub duration_days: u64,
    #[serde(default)]
    pub status: String,
}

impl LoanRecord {
    /// Interest rate as a human-readable percentage.
    pub fn interest_percent(&self) -> f64 {
        units::from_basis_points(self.interest_rate)
    }
}
