use rust_decimal::Decimal;

use crate::domain::verdict::codes;
use crate::domain::{BlockReason, TransactionSnapshot, Verdict};
use crate::rules::traits::BudgetRule;

/// Minimum amount rule.
///
/// The bound is inclusive: an amount equal to the minimum is valid.
#[derive(Debug)]
pub struct MinAmountRule {
    min_amount: Decimal,
}

impl MinAmountRule {
    pub fn new(min_amount: Decimal) -> Self {
        MinAmountRule { min_amount }
    }
}

impl BudgetRule for MinAmountRule {
    fn id(&self) -> &'static str {
        codes::MIN_AMOUNT
    }

    fn evaluate(&self, txn: &TransactionSnapshot) -> Option<Verdict> {
        if txn.amount < self.min_amount {
            return Some(Verdict::Blocked(BlockReason::AmountBelowMinimum {
                amount: txn.amount,
                min_amount: self.min_amount,
            }));
        }

        None
    }
}
