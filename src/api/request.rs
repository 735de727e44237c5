use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::TransactionSnapshot;
use crate::graph::{RelationshipStore, OTHER_CATEGORY};

/// Request for a transaction check.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Free-form description of the purchase
    #[serde(default)]
    pub description: Option<String>,

    /// Store or service the money goes to
    #[serde(default)]
    pub store: Option<String>,

    /// Spending category; classified from `store` when absent
    #[serde(default)]
    pub category: Option<String>,

    /// Proposed transaction amount
    pub amount: Decimal,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Already spent in the category before this transaction
    #[serde(default)]
    pub category_total: Decimal,

    /// Already spent overall before this transaction
    #[serde(default)]
    pub total_spent: Decimal,

    #[serde(default)]
    pub is_budget_exceeded: bool,

    /// Day the purchase happens
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// How the category of a checked transaction was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySource {
    Request,
    Classified,
    Default,
}

impl CheckRequest {
    /// Category for this request, classifying the store if none was given.
    pub fn resolve_category(&self, graph: &RelationshipStore) -> (String, CategorySource) {
        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            return (category.to_string(), CategorySource::Request);
        }

        match self.store.as_deref() {
            Some(store) => (
                graph.category_for_store(store.trim()).to_string(),
                CategorySource::Classified,
            ),
            None => (OTHER_CATEGORY.to_string(), CategorySource::Default),
        }
    }

    /// Convert to a snapshot for rule evaluation.
    ///
    /// Tags are trimmed and empty tags dropped.
    pub fn to_snapshot(&self, category: String) -> TransactionSnapshot {
        TransactionSnapshot {
            amount: self.amount,
            category,
            tags: self
                .tags
                .iter()
                .map(|tag| tag.trim())
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
            category_total: self.category_total,
            total_spent: self.total_spent,
            is_budget_exceeded: self.is_budget_exceeded,
        }
    }
}
