use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::penalty::PenaltyConfig;

/// product configuration
///
/// named constants for the single fixed-rate monthly-installment product.
/// the surrounding application may override these from its environment; the
/// core only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    /// annual interest rate used when a loan record carries none
    pub default_annual_rate: Rate,
    /// days past due before penalties start accruing
    pub penalty_grace_days: u32,
    /// simple daily penalty rate on the unpaid balance
    pub penalty_daily_rate: Rate,
    pub min_loan_amount: Money,
    pub max_loan_amount: Money,
    pub min_tenor_months: u32,
    pub max_tenor_months: u32,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            default_annual_rate: Rate::from_decimal(dec!(0.24)),
            penalty_grace_days: 0,
            penalty_daily_rate: Rate::from_decimal(dec!(0.001)),
            min_loan_amount: Money::from_major(3_500),
            max_loan_amount: Money::from_major(50_000),
            min_tenor_months: 1,
            max_tenor_months: 18,
        }
    }
}

impl ProductConfig {
    /// validate a loan application against product limits
    pub fn validate_application(&self, principal: Money, tenor_months: u32) -> Result<()> {
        if principal < self.min_loan_amount || principal > self.max_loan_amount {
            return Err(LedgerError::AmountOutOfBounds {
                amount: principal,
                minimum: self.min_loan_amount,
                maximum: self.max_loan_amount,
            });
        }

        if tenor_months < self.min_tenor_months || tenor_months > self.max_tenor_months {
            return Err(LedgerError::TenorOutOfBounds {
                months: tenor_months,
                minimum: self.min_tenor_months,
                maximum: self.max_tenor_months,
            });
        }

        Ok(())
    }

    /// penalty configuration for this product
    pub fn penalty_config(&self) -> PenaltyConfig {
        PenaltyConfig {
            grace_days: self.penalty_grace_days,
            daily_rate: self.penalty_daily_rate,
        }
    }
}
