use crate::domain::{TransactionSnapshot, Verdict};
use std::fmt::Debug;

/// A single link in the budget rule chain.
///
/// Rules are pure: they look only at the snapshot and the configuration
/// they were compiled with. Returning `Some` stops the chain; `None` hands
/// the transaction to the next rule.
pub trait BudgetRule: Send + Sync + Debug {
    /// Stable identifier for this rule.
    fn id(&self) -> &'static str;

    /// Evaluate the rule against a transaction.
    fn evaluate(&self, txn: &TransactionSnapshot) -> Option<Verdict>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BlockReason;
    use rust_decimal::Decimal;

    #[derive(Debug)]
    struct AlwaysBlock;

    impl BudgetRule for AlwaysBlock {
        fn id(&self) -> &'static str {
            "TEST_RULE"
        }

        fn evaluate(&self, _txn: &TransactionSnapshot) -> Option<Verdict> {
            Some(Verdict::Blocked(BlockReason::BudgetAlreadyExceeded))
        }
    }

    #[test]
    fn test_budget_rule_trait() {
        let rule = AlwaysBlock;
        let txn = TransactionSnapshot::new(Decimal::ONE, "Food");

        assert_eq!(rule.id(), "TEST_RULE");
        assert!(rule.evaluate(&txn).is_some());
    }
}
