use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::state::Installment;

/// penalty configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyConfig {
    /// days past the due date before penalties apply
    pub grace_days: u32,
    /// simple daily rate charged on the unpaid balance
    pub daily_rate: Rate,
}

/// engine for accruing late penalties on overdue installments
pub struct PenaltyEngine {
    pub config: PenaltyConfig,
}

impl PenaltyEngine {
    pub fn new(config: PenaltyConfig) -> Self {
        Self { config }
    }

    /// accrue the penalty on an installment as of a given date
    ///
    /// simple, non-compounding daily interest on the unpaid principal+interest
    /// balance (prior penalty excluded), for each full day past the grace
    /// boundary. pure function of the installment and the as-of date, so
    /// repeated evaluation never double-applies.
    pub fn accrue(&self, installment: &Installment, as_of: NaiveDate) -> PenaltyAccrual {
        let unpaid = installment.unpaid_balance();

        let days_past_due = (as_of - installment.due_date).num_days();
        let days_late = days_past_due - self.config.grace_days as i64;

        if unpaid.is_zero() || days_late <= 0 {
            return PenaltyAccrual {
                penalty_amount: Money::ZERO,
                days_late: 0,
                unpaid_base: unpaid,
                grace_applied: days_past_due > 0 && days_late <= 0,
            };
        }

        let penalty = unpaid.as_decimal()
            * self.config.daily_rate.as_decimal()
            * Decimal::from(days_late);

        PenaltyAccrual {
            penalty_amount: Money::from_decimal(penalty),
            days_late: days_late as u32,
            unpaid_base: unpaid,
            grace_applied: false,
        }
    }

    /// accrue as of the time provider's current date
    pub fn accrue_at(&self, installment: &Installment, time: &SafeTimeProvider) -> PenaltyAccrual {
        self.accrue(installment, time.now().date_naive())
    }
}

/// penalty accrual result
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyAccrual {
    pub penalty_amount: Money,
    pub days_late: u32,
    pub unpaid_base: Money,
    pub grace_applied: bool,
}
