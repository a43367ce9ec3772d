use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};

/// equal periodic installment (EMI) for a fixed-rate monthly-installment loan
///
/// zero rate degrades to straight-line principal / tenor. result is rounded
/// to the currency minor unit, half-up.
pub fn installment_amount(principal: Money, annual_rate: Rate, tenor_months: u32) -> Result<Money> {
    validate_terms(principal, annual_rate, tenor_months)?;

    let monthly_rate = annual_rate.monthly_rate().as_decimal();

    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(tenor_months));
    }

    // EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)
    let compound = compound_factor(monthly_rate, tenor_months);
    let numerator = principal.as_decimal() * monthly_rate * compound;
    let denominator = compound - Decimal::ONE;

    Ok(Money::from_decimal(numerator / denominator))
}

/// reject terms the product cannot amortize
pub fn validate_terms(principal: Money, annual_rate: Rate, tenor_months: u32) -> Result<()> {
    if !principal.is_positive() {
        return Err(LedgerError::InvalidPrincipal { amount: principal });
    }
    if tenor_months == 0 {
        return Err(LedgerError::InvalidTenor { months: tenor_months });
    }
    if annual_rate.is_negative() {
        return Err(LedgerError::InvalidRate { rate: annual_rate });
    }
    Ok(())
}

/// (1 + r)^n
pub(crate) fn compound_factor(monthly_rate: Decimal, months: u32) -> Decimal {
    let base = Decimal::ONE + monthly_rate;
    let mut factor = Decimal::ONE;
    for _ in 0..months {
        factor *= base;
    }
    factor
}
