use thiserror::Error;
use uuid::Uuid;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid principal: {amount}")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid tenor: {months} months")]
    InvalidTenor {
        months: u32,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidRate {
        rate: Rate,
    },

    #[error("loan amount out of bounds: {amount}, allowed {minimum} to {maximum}")]
    AmountOutOfBounds {
        amount: Money,
        minimum: Money,
        maximum: Money,
    },

    #[error("tenor out of bounds: {months} months, allowed {minimum} to {maximum}")]
    TenorOutOfBounds {
        months: u32,
        minimum: u32,
        maximum: u32,
    },

    #[error("credited {credited} exceeds total due {total_due} on installment {installment_id}")]
    Inconsistency {
        installment_id: Uuid,
        credited: Money,
        total_due: Money,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
