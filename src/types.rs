use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for an installment
pub type InstallmentId = Uuid;

/// unique identifier for a payment submission
pub type PaymentId = Uuid;

/// loan lifecycle status, driven by the external reviewer process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// application created, not yet reviewed
    New,
    /// under reviewer evaluation
    UnderReview,
    /// approved, awaiting release
    Approved,
    /// queued for disbursement
    ForRelease,
    /// funds released, repayment schedule active
    Disbursed,
    /// fully repaid
    Closed,
    /// application rejected
    Rejected,
    /// withdrawn by the borrower
    Cancelled,
    /// terms renegotiated into a new loan
    Restructured,
}

impl LoanStatus {
    /// whether the loan carries an active repayment schedule
    pub fn is_servicing(&self) -> bool {
        matches!(self, LoanStatus::Disbursed | LoanStatus::Restructured)
    }
}

/// reviewer decision state of a payment submission
///
/// transitions are terminal: pending -> approved or pending -> rejected, never
/// back. a borrower retrying after rejection creates a new submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
}

/// display status of an installment after reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    /// fully settled
    Paid,
    /// some credit confirmed, balance remains
    Partial,
    /// submission awaiting review, nothing confirmed yet
    Pending,
    /// open for payment
    Available,
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DisplayStatus::Paid => "paid",
            DisplayStatus::Partial => "partial",
            DisplayStatus::Pending => "pending",
            DisplayStatus::Available => "available",
        };
        write!(f, "{s}")
    }
}
