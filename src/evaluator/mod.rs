pub mod summary;

pub use summary::{BudgetHealth, BudgetSummary};

use crate::domain::{RuleSet, TransactionSnapshot, Verdict};
use crate::rules::RuleChain;

/// Evaluate a transaction against a rule set.
///
/// Compiles the chain on every call. Callers checking many transactions
/// against the same rule set should build a [`RuleChain`] once instead.
pub fn evaluate(ruleset: &RuleSet, txn: &TransactionSnapshot) -> Verdict {
    RuleChain::from_ruleset(ruleset).evaluate(txn)
}
