pub mod reconcile;

use crate::state::PaymentSubmission;
use crate::types::InstallmentId;

pub use reconcile::{Reconciler, ReconciliationResult};

/// submissions referencing one installment, in submission order
pub fn submissions_for<'a>(
    submissions: &'a [PaymentSubmission],
    installment_id: InstallmentId,
) -> Vec<&'a PaymentSubmission> {
    submissions
        .iter()
        .filter(|s| s.installment_id == installment_id)
        .collect()
}
