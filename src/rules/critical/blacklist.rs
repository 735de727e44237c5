use std::collections::HashSet;

use crate::domain::verdict::codes;
use crate::domain::{BlockReason, TransactionSnapshot, Verdict};
use crate::rules::traits::BudgetRule;

/// Blacklisted tag rule.
///
/// Matching is exact and case-sensitive. The first blacklisted tag in the
/// transaction's tag order is the one reported.
#[derive(Debug)]
pub struct BlacklistRule {
    tags: HashSet<String>,
}

impl BlacklistRule {
    pub fn new(tags: HashSet<String>) -> Self {
        BlacklistRule { tags }
    }

    #[inline]
    fn is_blacklisted(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

impl BudgetRule for BlacklistRule {
    fn id(&self) -> &'static str {
        codes::BLACKLIST
    }

    fn evaluate(&self, txn: &TransactionSnapshot) -> Option<Verdict> {
        txn.tags
            .iter()
            .find(|tag| self.is_blacklisted(tag))
            .map(|tag| Verdict::Blocked(BlockReason::BlacklistedTag { tag: tag.clone() }))
    }
}
