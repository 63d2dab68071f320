//! Transaction submission flows.
//!
//! Every submission walks the same states: validate the form, build the
//! payload, hand it to the wallet, interpret the result. The first
//! validation failure resolves the submission immediately; the wallet is
//! never contacted with a partially valid form. No retries; the user
//! resubmits by hand.

use crate::payload;
use crate::units;
use crate::validate::{validate_address, validate_amount};
use crate::wallet::{SubmittedTransaction, TransactionSigner, WalletSession};
use crate::{BudgetAllocation, ClientError, Result};

/// Memo attached to QR-initiated payments.
pub const PAYMENT_MEMO: &str = "Payment via QR";

/// Memo attached to loan requests.
pub const LOAN_MEMO: &str = "Student loan request";

/// Where a submission currently is. Terminal in `Resolved`; the `Result`
/// of the flow carries the success/failure detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Building,
    AwaitingSignature,
    Resolved,
}

/// Payment form state: both fields as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    pub recipient: String,
    pub amount: String,
}

impl PaymentForm {
    pub fn reset(&mut self) {
        self.recipient.clear();
        self.amount.clear();
    }
}

/// Loan request form state. Rate and duration start at the defaults the
/// form shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanRequestForm {
    /// Principal in APT.
    pub amount: String,
    /// Interest rate in percent.
    pub interest_rate: String,
    pub duration_days: String,
}

impl Default for LoanRequestForm {
    fn default() -> Self {
        Self {
            amount: String::new(),
            interest_rate: "5".to_string(),
            duration_days: "30".to_string(),
        }
    }
}

/// One submission, start to finish. Created fresh per user action; holds
/// no state across submissions.
pub struct Submission<'a, S> {
    session: &'a WalletSession<S>,
    state: SubmissionState,
}

impl<'a, S: TransactionSigner> Submission<'a, S> {
    pub fn new(session: &'a WalletSession<S>) -> Self {
        Self {
            session,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    fn transition(&mut self, next: SubmissionState) {
        tracing::debug!(from = ?self.state, to = ?next, "submission state");
        self.state = next;
    }

    /// Send a payment. On success the form is cleared for the next one.
    pub async fn payment(mut self, form: &mut PaymentForm) -> Result<SubmittedTransaction> {
        self.transition(SubmissionState::Validating);
        let result = self.run_payment(form).await;
        self.transition(SubmissionState::Resolved);
        if result.is_ok() {
            form.reset();
        }
        result
    }

    async fn run_payment(&mut self, form: &PaymentForm) -> Result<SubmittedTransaction> {
        validate_address(&form.recipient)?;
        validate_amount(&form.amount)?;

        self.transition(SubmissionState::Building);
        let octas = units::to_octas(&form.amount)?;
        let payload = payload::make_payment(&form.recipient, &octas, PAYMENT_MEMO);
        tracing::debug!(recipient = %form.recipient, octas = %octas, "payment payload built");

        self.transition(SubmissionState::AwaitingSignature);
        self.session.sign_and_submit(&payload).await
    }

    /// Request a student loan. On success the amount is cleared; rate and
    /// duration keep their values for the next request.
    pub async fn loan_request(mut self, form: &mut LoanRequestForm) -> Result<SubmittedTransaction> {
        self.transition(SubmissionState::Validating);
        let result = self.run_loan_request(form).await;
        self.transition(SubmissionState::Resolved);
        if result.is_ok() {
            form.amount.clear();
        }
        result
    }

    async fn run_loan_request(&mut self, form: &LoanRequestForm) -> Result<SubmittedTransaction> {
        let amount = validate_amount(&form.amount)?;
        let rate: f64 = form
            .interest_rate
            .trim()
            .parse()
            .map_err(|_| ClientError::InvalidNumber(form.interest_rate.clone()))?;
        let duration: u64 = form
            .duration_days
            .trim()
            .parse()
            .map_err(|_| ClientError::InvalidNumber(form.duration_days.clone()))?;

        self.transition(SubmissionState::Building);
        // Loan principal goes on-chain in whole APT.
        let payload = payload::request_loan(
            self.session.account(),
            amount.trunc() as u64,
            units::to_basis_points(rate),
            duration,
            LOAN_MEMO,
        );
        tracing::debug!(borrower = %self.session.account(), "loan request payload built");

        self.transition(SubmissionState::AwaitingSignature);
        self.session.sign_and_submit(&payload).await
    }

    /// Write a budget allocation back to the contract. Percentages are
    /// submitted as entered; the sum is displayed, never enforced.
    pub async fn budget_update(mut self, budget: &BudgetAllocation) -> Result<SubmittedTransaction> {
        self.transition(SubmissionState::Validating);
        self.transition(SubmissionState::Building);
        let payload = payload::update_budget(self.session.account(), budget);
        tracing::debug!(owner = %self.session.account(), total = budget.total, "budget payload built");

        self.transition(SubmissionState::AwaitingSignature);
        let result = self.session.sign_and_submit(&payload).await;
        self.transition(SubmissionState::Resolved);
        result
    }
}

/// Validate, build and submit a payment from form state.
pub async fn submit_payment<S: TransactionSigner>(
    session: &WalletSession<S>,
    form: &mut PaymentForm,
) -> Result<SubmittedTransaction> {
    Submission::new(session).payment(form).await
}

/// Validate, build and submit a loan request from form state.
pub async fn submit_loan_request<S: TransactionSigner>(
    session: &WalletSession<S>,
    form: &mut LoanRequestForm,
) -> Result<SubmittedTransaction> {
    Submission::new(session).loan_request(form).await
}

/// Build and submit a budget update.
pub async fn submit_budget_update<S: TransactionSigner>(
    session: &WalletSession<S>,
    budget: &BudgetAllocation,
) -> Result<SubmittedTransaction> {
    Submission::new(session).budget_update(budget).await
}
