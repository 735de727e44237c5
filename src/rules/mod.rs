pub mod critical;
pub mod limits;
pub mod traits;

pub use critical::{BlacklistRule, BudgetExceededRule, MinAmountRule};
pub use limits::{CategoryBudgetRule, TotalBudgetRule};
pub use traits::BudgetRule;

use crate::domain::{ApprovalNote, RuleSet, TransactionSnapshot, Verdict};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Ordered, short-circuiting chain of compiled rules.
///
/// Hard filters come first, then budget limits. The first rule that fires
/// decides the verdict; if none fires the transaction is approved, with a
/// note when it carries a whitelisted tag.
#[derive(Debug)]
pub struct RuleChain {
    rules: Vec<Arc<dyn BudgetRule>>,
    whitelist: HashSet<String>,
}

impl RuleChain {
    /// Compile the chain for a rule set. Toggled-off rules are left out.
    pub fn from_ruleset(ruleset: &RuleSet) -> Self {
        let toggles = &ruleset.critical_rules;
        let thresholds = &ruleset.thresholds;
        let mut rules: Vec<Arc<dyn BudgetRule>> = Vec::new();

        if toggles.block_if_budget_exceeded {
            rules.push(Arc::new(BudgetExceededRule::new()));
        }

        rules.push(Arc::new(MinAmountRule::new(thresholds.min_amount)));

        if !ruleset.lists.blacklist.is_empty() {
            rules.push(Arc::new(BlacklistRule::new(ruleset.lists.blacklist.clone())));
        }

        if toggles.must_not_exceed_total_budget {
            rules.push(Arc::new(TotalBudgetRule::new(thresholds.max_total_budget)));
        }

        if toggles.must_not_exceed_category_budget && !thresholds.max_category_budget.is_empty() {
            rules.push(Arc::new(CategoryBudgetRule::new(
                thresholds.max_category_budget.clone(),
            )));
        }

        RuleChain {
            rules,
            whitelist: ruleset.lists.whitelist.clone(),
        }
    }

    /// Evaluate a transaction. Total and side-effect free.
    pub fn evaluate(&self, txn: &TransactionSnapshot) -> Verdict {
        for rule in &self.rules {
            if let Some(verdict) = rule.evaluate(txn) {
                debug!(
                    rule_id = rule.id(),
                    severity = %verdict.severity(),
                    category = %txn.category,
                    "Rule fired"
                );
                return verdict;
            }
        }

        let note = txn
            .tags
            .iter()
            .find(|tag| self.whitelist.contains(tag.as_str()))
            .map(|tag| ApprovalNote::WhitelistedTag { tag: tag.clone() });

        Verdict::Approved(note)
    }

    /// Identifiers of the compiled rules, in evaluation order.
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::verdict::codes;
    use crate::domain::{CriticalRules, TagLists, Thresholds};
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn ruleset(toggles: CriticalRules) -> RuleSet {
        RuleSet {
            critical_rules: toggles,
            thresholds: Thresholds {
                min_amount: Decimal::ZERO,
                max_total_budget: Decimal::new(10000, 0),
                max_category_budget: BTreeMap::from([(
                    "Transport".to_string(),
                    Decimal::new(5000, 0),
                )]),
            },
            lists: TagLists {
                blacklist: HashSet::from(["fraud".to_string()]),
                whitelist: HashSet::from(["verified".to_string()]),
            },
        }
    }

    #[test]
    fn test_chain_order_all_enabled() {
        let chain = RuleChain::from_ruleset(&ruleset(CriticalRules {
            block_if_budget_exceeded: true,
            must_not_exceed_total_budget: true,
            must_not_exceed_category_budget: true,
        }));

        assert_eq!(
            chain.rule_ids(),
            vec![
                codes::BUDGET_EXCEEDED,
                codes::MIN_AMOUNT,
                codes::BLACKLIST,
                codes::TOTAL_BUDGET,
                codes::CATEGORY_BUDGET,
            ]
        );
    }

    #[test]
    fn test_toggles_drop_rules() {
        let chain = RuleChain::from_ruleset(&ruleset(CriticalRules::default()));

        assert_eq!(chain.rule_ids(), vec![codes::MIN_AMOUNT, codes::BLACKLIST]);
        assert!(!chain.is_empty());
    }

    #[test]
    fn test_whitelist_note_on_approval() {
        let chain = RuleChain::from_ruleset(&ruleset(CriticalRules::default()));
        let txn = TransactionSnapshot::new(Decimal::new(100, 0), "Food")
            .with_tags(["groceries", "verified"]);

        assert_eq!(
            chain.evaluate(&txn),
            Verdict::Approved(Some(ApprovalNote::WhitelistedTag {
                tag: "verified".to_string()
            }))
        );
    }

    #[test]
    fn test_whitelist_does_not_annotate_warnings() {
        let chain = RuleChain::from_ruleset(&ruleset(CriticalRules {
            must_not_exceed_category_budget: true,
            ..Default::default()
        }));
        let txn =
            TransactionSnapshot::new(Decimal::new(4500, 0), "Transport").with_tags(["verified"]);

        assert!(matches!(chain.evaluate(&txn), Verdict::Warned(_)));
    }
}
