use rust_decimal::Decimal;

use crate::domain::verdict::codes;
use crate::domain::{RejectReason, TransactionSnapshot, Verdict};
use crate::rules::traits::BudgetRule;

/// Total budget rule.
///
/// Rejects a transaction whose amount would push overall spending strictly
/// past the configured total budget.
#[derive(Debug)]
pub struct TotalBudgetRule {
    limit: Decimal,
}

impl TotalBudgetRule {
    pub fn new(limit: Decimal) -> Self {
        TotalBudgetRule { limit }
    }
}

impl BudgetRule for TotalBudgetRule {
    fn id(&self) -> &'static str {
        codes::TOTAL_BUDGET
    }

    fn evaluate(&self, txn: &TransactionSnapshot) -> Option<Verdict> {
        // An overflowing positive total is past any limit; a negative one is below it.
        let (current_total, exceeded) = match txn.projected_total() {
            Some(total) => (total, total > self.limit),
            None => (txn.overflow_bound(), !txn.amount.is_sign_negative()),
        };

        if exceeded {
            return Some(Verdict::Rejected(RejectReason::TotalBudgetExceeded {
                current_total,
                limit: self.limit,
            }));
        }

        None
    }
}
