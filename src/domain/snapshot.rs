use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time view of a proposed transaction, built fresh for each check.
///
/// No invariants are enforced here; every validity check is a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSnapshot {
    /// Proposed transaction amount
    pub amount: Decimal,

    /// Spending category of the transaction
    pub category: String,

    /// Tags attached to the transaction
    #[serde(default)]
    pub tags: Vec<String>,

    /// Already spent in this category before this transaction
    #[serde(default)]
    pub category_total: Decimal,

    /// Already spent overall before this transaction
    #[serde(default)]
    pub total_spent: Decimal,

    /// Whether the global budget was already exceeded before this transaction
    #[serde(default)]
    pub is_budget_exceeded: bool,
}

impl TransactionSnapshot {
    /// Create a snapshot with no prior spending and no tags.
    pub fn new(amount: Decimal, category: impl Into<String>) -> Self {
        TransactionSnapshot {
            amount,
            category: category.into(),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category_total(mut self, category_total: Decimal) -> Self {
        self.category_total = category_total;
        self
    }

    pub fn with_total_spent(mut self, total_spent: Decimal) -> Self {
        self.total_spent = total_spent;
        self
    }

    pub fn with_budget_exceeded(mut self, exceeded: bool) -> Self {
        self.is_budget_exceeded = exceeded;
        self
    }

    /// Overall spending if this transaction goes through.
    ///
    /// `None` when the sum leaves the `Decimal` range.
    #[inline]
    pub fn projected_total(&self) -> Option<Decimal> {
        self.total_spent.checked_add(self.amount)
    }

    /// Category spending if this transaction goes through.
    ///
    /// `None` when the sum leaves the `Decimal` range.
    #[inline]
    pub fn projected_category_total(&self) -> Option<Decimal> {
        self.category_total.checked_add(self.amount)
    }

    /// Bound an overflowing projection saturates to.
    ///
    /// A sum only overflows when both operands share a sign, so the amount
    /// decides which end of the range was crossed.
    #[inline]
    pub fn overflow_bound(&self) -> Decimal {
        if self.amount.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let txn = TransactionSnapshot::new(Decimal::new(500, 0), "Food")
            .with_tags(["lunch", "work"])
            .with_category_total(Decimal::new(1000, 0))
            .with_total_spent(Decimal::new(4000, 0));

        assert_eq!(txn.category, "Food");
        assert_eq!(txn.tags, vec!["lunch".to_string(), "work".to_string()]);
        assert_eq!(txn.projected_total(), Some(Decimal::new(4500, 0)));
        assert_eq!(txn.projected_category_total(), Some(Decimal::new(1500, 0)));
        assert!(!txn.is_budget_exceeded);
    }

    #[test]
    fn test_projection_overflow() {
        let txn = TransactionSnapshot::new(Decimal::MAX, "Food")
            .with_total_spent(Decimal::ONE)
            .with_category_total(Decimal::ONE);

        assert_eq!(txn.projected_total(), None);
        assert_eq!(txn.projected_category_total(), None);
        assert_eq!(txn.overflow_bound(), Decimal::MAX);

        let refund = TransactionSnapshot::new(Decimal::MIN, "Food")
            .with_total_spent(-Decimal::ONE);
        assert_eq!(refund.projected_total(), None);
        assert_eq!(refund.overflow_bound(), Decimal::MIN);
    }

    #[test]
    fn test_deserialization_defaults() {
        let txn: TransactionSnapshot =
            serde_json::from_str(r#"{"amount": 250, "category": "Coffee"}"#).unwrap();

        assert_eq!(txn.amount, Decimal::new(250, 0));
        assert!(txn.tags.is_empty());
        assert_eq!(txn.total_spent, Decimal::ZERO);
    }
}
