//! Entry-function payload assembly.
//!
//! Pure construction, performed only after validation has passed. Each
//! contract operation has a fixed argument order that must match the Move
//! signature exactly; the builders here are the single source of truth for
//! those schemas.

use serde::{Deserialize, Serialize};

use crate::{BudgetAllocation, CONTRACT_ADDRESS, MODULE_NAME};

/// Entry function names on the Blocadamia module.
pub const FN_MAKE_PAYMENT: &str = "make_payment";
pub const FN_REQUEST_LOAN: &str = "request_loan";
pub const FN_UPDATE_BUDGET: &str = "update_budget";

/// View function names.
pub const FN_GET_USER_PROFILE: &str = "get_user_profile";
pub const FN_GET_USER_LOANS_AS_BORROWER: &str = "get_user_loans_as_borrower";

/// A call descriptor ready to hand to a wallet for signing, or to POST at
/// a fullnode view endpoint. Arguments are stringly typed in the order the
/// target function expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFunctionPayload {
    /// Fully qualified `address::module::function` identifier.
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<String>,
}

/// Qualify a bare function name with the fixed contract coordinates.
pub fn contract_function(name: &str) -> String {
    format!("{CONTRACT_ADDRESS}::{MODULE_NAME}::{name}")
}

/// Assemble a payload for any Blocadamia entry function. Never fails;
/// callers validate inputs first.
pub fn entry_function(name: &str, arguments: Vec<String>) -> EntryFunctionPayload {
    EntryFunctionPayload {
        function: contract_function(name),
        type_arguments: Vec::new(),
        arguments,
    }
}

/// `make_payment(admin, recipient, amount_octas, memo)`
pub fn make_payment(recipient: &str, amount_octas: &str, memo: &str) -> EntryFunctionPayload {
    entry_function(
        FN_MAKE_PAYMENT,
        vec![
            CONTRACT_ADDRESS.to_string(),
            recipient.to_string(),
            amount_octas.to_string(),
            memo.to_string(),
        ],
    )
}

/// `request_loan(borrower, amount, interest_rate_bps, duration_days, memo)`
///
/// The loan principal is denominated in whole APT, not Octas.
pub fn request_loan(
    borrower: &str,
    amount_apt: u64,
    interest_rate_bps: i64,
    duration_days: u64,
    memo: &str,
) -> EntryFunctionPayload {
    entry_function(
        FN_REQUEST_LOAN,
        vec![
            borrower.to_string(),
            amount_apt.to_string(),
            interest_rate_bps.to_string(),
            duration_days.to_string(),
            memo.to_string(),
        ],
    )
}

/// `update_budget(owner, food, rent, travel, entertainment, education, other, total)`
pub fn update_budget(owner: &str, budget: &BudgetAllocation) -> EntryFunctionPayload {
    entry_function(
        FN_UPDATE_BUDGET,
        vec![
            owner.to_string(),
            budget.food.to_string(),
            budget.rent.to_string(),
            budget.travel.to_string(),
            budget.entertainment.to_string(),
            budget.education.to_string(),
            budget.other.to_string(),
            budget.total.to_string(),
        ],
    )
}
