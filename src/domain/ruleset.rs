use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Budget-control policy loaded from configuration.
///
/// Immutable once loaded. Sections mirror the configuration document:
/// `critical_rules`, `thresholds` and `lists`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Rule toggles
    pub critical_rules: CriticalRules,

    /// Amount bounds and budget limits
    pub thresholds: Thresholds,

    /// Tag lists
    pub lists: TagLists,
}

impl RuleSet {
    /// Configured limit for a category, if any.
    pub fn category_limit(&self, category: &str) -> Option<Decimal> {
        self.thresholds.max_category_budget.get(category).copied()
    }

    pub fn is_blacklisted(&self, tag: &str) -> bool {
        self.lists.blacklist.contains(tag)
    }

    pub fn is_whitelisted(&self, tag: &str) -> bool {
        self.lists.whitelist.contains(tag)
    }
}

/// Boolean switches for the optional rules in the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalRules {
    /// Block every transaction once the global budget is already exceeded
    pub block_if_budget_exceeded: bool,

    /// Reject transactions that would push overall spending past the total budget
    pub must_not_exceed_total_budget: bool,

    /// Reject transactions that would push a category past its limit
    pub must_not_exceed_category_budget: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Inclusive lower bound for a valid amount
    pub min_amount: Decimal,

    pub max_total_budget: Decimal,

    /// Per-category limits; missing categories are unlimited
    pub max_category_budget: BTreeMap<String, Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagLists {
    pub blacklist: HashSet<String>,
    pub whitelist: HashSet<String>,
}
