pub mod balance;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod payments;
pub mod penalty;
pub mod schedule;
pub mod state;
pub mod types;

// re-export key types
pub use balance::{InstallmentView, LoanBalance, LoanBalanceAggregator};
pub use config::ProductConfig;
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use payments::{submissions_for, Reconciler, ReconciliationResult};
pub use penalty::{PenaltyAccrual, PenaltyConfig, PenaltyEngine};
pub use schedule::{installment_amount, Schedule, ScheduledInstallment};
pub use state::{Installment, Loan, PaymentSubmission};
pub use types::{
    DisplayStatus, InstallmentId, LoanId, LoanStatus, PaymentId, PaymentStatus,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
