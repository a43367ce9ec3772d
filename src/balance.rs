use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;

use crate::config::ProductConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::{Reconciler, ReconciliationResult};
use crate::penalty::{PenaltyAccrual, PenaltyEngine};
use crate::schedule::Schedule;
use crate::state::{Installment, Loan, PaymentSubmission};

/// loan-level balance aggregate
#[derive(Debug, Clone, PartialEq)]
pub struct LoanBalance {
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_outstanding: Money,
    /// earliest due date still carrying a balance, none when settled
    pub next_due_date: Option<NaiveDate>,
    /// true when no schedule rows existed and the figures were synthesized
    /// from the product's default rate
    pub is_estimate: bool,
}

/// per-installment dashboard row
#[derive(Debug, Clone)]
pub struct InstallmentView<'a> {
    pub installment: &'a Installment,
    pub penalty: PenaltyAccrual,
    pub reconciliation: ReconciliationResult,
}

/// rolls a loan's installments and payment submissions up into one balance
pub struct LoanBalanceAggregator {
    config: ProductConfig,
    penalty_engine: PenaltyEngine,
}

impl LoanBalanceAggregator {
    pub fn new(config: ProductConfig) -> Self {
        let penalty_engine = PenaltyEngine::new(config.penalty_config());
        Self {
            config,
            penalty_engine,
        }
    }

    /// aggregate a loan's balance as of a given date
    ///
    /// penalties on overdue installments are re-accrued as of the date and
    /// take precedence over a stale recorded penalty. falls back to a
    /// default-rate estimate when no schedule rows exist.
    pub fn aggregate(
        &self,
        loan: &Loan,
        installments: &[Installment],
        payments: &[PaymentSubmission],
        as_of: NaiveDate,
    ) -> Result<LoanBalance> {
        if installments.is_empty() || installments.iter().any(|i| !i.amount_due.is_positive()) {
            return self.estimate(loan, payments);
        }

        let views = self.installment_views(installments, payments, as_of)?;

        let total_due_scheduled = installments
            .iter()
            .map(|i| i.amount_due)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_outstanding = views
            .iter()
            .map(|v| v.reconciliation.remaining_balance)
            .fold(Money::ZERO, |acc, x| acc + x);

        let next_due_date = views
            .iter()
            .filter(|v| v.reconciliation.remaining_balance.is_positive())
            .map(|v| v.installment.due_date)
            .min();

        Ok(LoanBalance {
            total_principal: loan.principal,
            total_interest: total_due_scheduled - loan.principal,
            total_outstanding,
            next_due_date,
            is_estimate: false,
        })
    }

    /// aggregate as of the time provider's current date
    pub fn aggregate_at(
        &self,
        loan: &Loan,
        installments: &[Installment],
        payments: &[PaymentSubmission],
        time: &SafeTimeProvider,
    ) -> Result<LoanBalance> {
        self.aggregate(loan, installments, payments, time.now().date_naive())
    }

    /// reconciled rows for dashboard rendering, in schedule order
    pub fn installment_views<'a>(
        &self,
        installments: &'a [Installment],
        payments: &[PaymentSubmission],
        as_of: NaiveDate,
    ) -> Result<Vec<InstallmentView<'a>>> {
        let mut views = Vec::with_capacity(installments.len());

        for installment in installments {
            let penalty = self.penalty_engine.accrue(installment, as_of);
            let effective_penalty = installment.penalty_applied.max(penalty.penalty_amount);
            let reconciliation =
                Reconciler::reconcile_with_penalty(installment, payments, effective_penalty)?;

            views.push(InstallmentView {
                installment,
                penalty,
                reconciliation,
            });
        }

        Ok(views)
    }

    /// default-rate estimate used when the schedule has not been generated
    fn estimate(&self, loan: &Loan, payments: &[PaymentSubmission]) -> Result<LoanBalance> {
        let schedule = Schedule::generate(
            loan.principal,
            self.config.default_annual_rate,
            loan.tenor_months,
            loan.application_date,
        )?;

        let credited = payments
            .iter()
            .filter(|p| p.loan_id == loan.loan_id && p.is_confirmed_unsettled())
            .map(|p| p.amount)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_payment = schedule.installment * Decimal::from(loan.tenor_months);
        let total_outstanding = (total_payment - credited).max(Money::ZERO);

        let next_due_date = if total_outstanding.is_positive() {
            schedule.periods.first().map(|p| p.due_date)
        } else {
            None
        };

        Ok(LoanBalance {
            total_principal: loan.principal,
            total_interest: total_payment - loan.principal,
            total_outstanding,
            next_due_date,
            is_estimate: true,
        })
    }
}
