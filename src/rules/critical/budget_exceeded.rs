use crate::domain::verdict::codes;
use crate::domain::{BlockReason, TransactionSnapshot, Verdict};
use crate::rules::traits::BudgetRule;

/// Blocks every transaction once the global budget is already exceeded.
///
/// Only compiled into the chain when `block_if_budget_exceeded` is on.
#[derive(Debug, Default)]
pub struct BudgetExceededRule;

impl BudgetExceededRule {
    pub fn new() -> Self {
        BudgetExceededRule
    }
}

impl BudgetRule for BudgetExceededRule {
    fn id(&self) -> &'static str {
        codes::BUDGET_EXCEEDED
    }

    fn evaluate(&self, txn: &TransactionSnapshot) -> Option<Verdict> {
        txn.is_budget_exceeded
            .then(|| Verdict::Blocked(BlockReason::BudgetAlreadyExceeded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_blocks_when_exceeded() {
        let rule = BudgetExceededRule::new();
        let txn = TransactionSnapshot::new(Decimal::new(100, 0), "Food").with_budget_exceeded(true);

        assert_eq!(
            rule.evaluate(&txn),
            Some(Verdict::Blocked(BlockReason::BudgetAlreadyExceeded))
        );
    }

    #[test]
    fn test_passes_when_within_budget() {
        let rule = BudgetExceededRule::new();
        let txn = TransactionSnapshot::new(Decimal::new(100, 0), "Food");

        assert!(rule.evaluate(&txn).is_none());
    }
}
