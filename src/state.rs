use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{InstallmentId, LoanId, LoanStatus, PaymentId, PaymentStatus};

/// loan record as fetched from the external store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub loan_id: LoanId,
    pub principal: Money,
    pub annual_rate: Rate,
    pub tenor_months: u32,
    pub application_date: NaiveDate,
    pub status: LoanStatus,
}

/// one repayment period within a loan's schedule
///
/// amount_paid and penalty_applied are written only by the external settlement
/// process and are monotone non-decreasing. approved-but-unposted submission
/// amounts are tracked by the reconciler, never folded in here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installment {
    pub installment_id: InstallmentId,
    pub loan_id: LoanId,
    /// 1-based position within the schedule
    pub index: u32,
    pub due_date: NaiveDate,
    pub amount_due: Money,
    pub amount_paid: Money,
    pub penalty_applied: Money,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Installment {
    /// scheduled amount plus recorded penalty
    pub fn total_due(&self) -> Money {
        self.amount_due + self.penalty_applied
    }

    /// principal+interest still unpaid, penalty excluded
    pub fn unpaid_balance(&self) -> Money {
        (self.amount_due - self.amount_paid).max(Money::ZERO)
    }

    /// whether the persisted ledger row alone covers the total due
    pub fn is_settled(&self) -> bool {
        self.amount_paid >= self.total_due()
    }
}

/// borrower payment submission awaiting or past reviewer decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSubmission {
    pub payment_id: PaymentId,
    pub loan_id: LoanId,
    pub installment_id: InstallmentId,
    pub amount: Money,
    pub status: PaymentStatus,
    pub submitted_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    /// penalty portion attributed to this submission, if any
    pub penalty_amount: Money,
    pub rejection_reason: Option<String>,
    /// set by the external system once this submission's amount has been
    /// folded into the installment's amount_paid. an approved submission is
    /// counted via confirmed credit only while this is false, so each
    /// submission is counted exactly once.
    pub settled: bool,
}

impl PaymentSubmission {
    /// counts toward confirmed credit: approved but not yet posted
    pub fn is_confirmed_unsettled(&self) -> bool {
        self.status == PaymentStatus::Approved && !self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn sample_installment() -> Installment {
        Installment {
            installment_id: Uuid::new_v4(),
            loan_id: Uuid::new_v4(),
            index: 1,
            due_date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            amount_due: Money::from_major(1000),
            amount_paid: Money::from_major(400),
            penalty_applied: Money::from_major(10),
            paid_at: None,
        }
    }

    #[test]
    fn test_installment_balances() {
        let inst = sample_installment();
        assert_eq!(inst.total_due(), Money::from_major(1010));
        assert_eq!(inst.unpaid_balance(), Money::from_major(600));
        assert!(!inst.is_settled());
    }

    #[test]
    fn test_unpaid_balance_floors_at_zero() {
        let mut inst = sample_installment();
        inst.amount_paid = Money::from_major(1010);
        assert_eq!(inst.unpaid_balance(), Money::ZERO);
        assert!(inst.is_settled());
    }

    #[test]
    fn test_submission_counting_flags() {
        let mut sub = PaymentSubmission {
            payment_id: Uuid::new_v4(),
            loan_id: Uuid::new_v4(),
            installment_id: Uuid::new_v4(),
            amount: Money::from_major(500),
            status: PaymentStatus::Approved,
            submitted_at: Utc::now(),
            approved_at: Some(Utc::now()),
            penalty_amount: Money::ZERO,
            rejection_reason: None,
            settled: false,
        };
        assert!(sub.is_confirmed_unsettled());

        sub.settled = true;
        assert!(!sub.is_confirmed_unsettled());

        sub.status = PaymentStatus::Pending;
        sub.settled = false;
        assert!(sub.is_pending());
        assert!(!sub.is_confirmed_unsettled());
    }

    #[test]
    fn test_loan_json_round_trip() {
        let loan = Loan {
            loan_id: Uuid::new_v4(),
            principal: Money::from_decimal(dec!(13800)),
            annual_rate: Rate::from_decimal(dec!(0.24)),
            tenor_months: 6,
            application_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status: LoanStatus::Disbursed,
        };

        let json = serde_json::to_string(&loan).unwrap();
        let back: Loan = serde_json::from_str(&json).unwrap();

        assert_eq!(back.loan_id, loan.loan_id);
        assert_eq!(back.principal, loan.principal);
        assert_eq!(back.annual_rate, loan.annual_rate);
        assert_eq!(back.status, LoanStatus::Disbursed);
    }
}
