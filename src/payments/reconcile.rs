use rust_decimal_macros::dec;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::state::{Installment, PaymentSubmission};
use crate::types::DisplayStatus;

/// reconciled view of one installment against its payment submissions
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationResult {
    /// approved but not yet settled into the ledger row
    pub confirmed_amount: Money,
    /// submitted, awaiting reviewer decision
    pub pending_amount: Money,
    /// scheduled amount plus penalty
    pub total_due: Money,
    /// settled ledger amount plus confirmed credit
    pub total_credited: Money,
    pub remaining_balance: Money,
    pub is_fully_settled: bool,
    pub display_status: DisplayStatus,
}

/// merges an installment's settled ledger state with its in-flight payment
/// submissions into one outstanding-balance figure
///
/// an approved submission is credited here only until the external system
/// settles it into amount_paid; from then on the settled flag excludes it, so
/// no submission is ever counted twice. pure over terminal submission states,
/// so the result is idempotent and independent of submission order.
pub struct Reconciler;

impl Reconciler {
    /// reconcile an installment against its submissions
    pub fn reconcile(
        installment: &Installment,
        submissions: &[PaymentSubmission],
    ) -> Result<ReconciliationResult> {
        Self::reconcile_with_penalty(installment, submissions, installment.penalty_applied)
    }

    /// reconcile with a caller-supplied penalty in place of the recorded one
    ///
    /// used by the balance aggregator to substitute a freshly accrued penalty
    /// for a stale penalty_applied.
    pub fn reconcile_with_penalty(
        installment: &Installment,
        submissions: &[PaymentSubmission],
        penalty: Money,
    ) -> Result<ReconciliationResult> {
        let mut confirmed_amount = Money::ZERO;
        let mut pending_amount = Money::ZERO;

        for submission in submissions {
            if submission.installment_id != installment.installment_id {
                continue;
            }
            if submission.is_confirmed_unsettled() {
                confirmed_amount += submission.amount;
            } else if submission.is_pending() {
                pending_amount += submission.amount;
            }
            // rejected and already-settled submissions carry no credit here
        }

        let total_due = installment.amount_due + penalty;
        let total_credited = installment.amount_paid + confirmed_amount;

        // credits within one cent of the total due are rounding; anything
        // beyond is an upstream settlement defect
        let epsilon = Money::from_decimal(dec!(0.01));
        if total_credited > total_due + epsilon {
            return Err(LedgerError::Inconsistency {
                installment_id: installment.installment_id,
                credited: total_credited,
                total_due,
            });
        }

        // the displayed balance is clamped at zero; the records never are
        let remaining_balance = (total_due - total_credited).max(Money::ZERO);
        let is_fully_settled = total_credited >= total_due;

        let display_status = if is_fully_settled {
            DisplayStatus::Paid
        } else if (confirmed_amount.is_positive() || installment.amount_paid.is_positive())
            && remaining_balance.is_positive()
        {
            DisplayStatus::Partial
        } else if pending_amount.is_positive() {
            DisplayStatus::Pending
        } else {
            DisplayStatus::Available
        };

        Ok(ReconciliationResult {
            confirmed_amount,
            pending_amount,
            total_due,
            total_credited,
            remaining_balance,
            is_fully_settled,
            display_status,
        })
    }
}
