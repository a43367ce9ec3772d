pub mod amortization;
pub mod generator;

pub use amortization::{installment_amount, validate_terms};
pub use generator::{add_months_clamped, Schedule, ScheduledInstallment};
