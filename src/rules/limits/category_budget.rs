use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::domain::verdict::codes;
use crate::domain::{RejectReason, TransactionSnapshot, Verdict, WarnReason};
use crate::rules::traits::BudgetRule;

/// Share of a category limit (0.8) from which a warning is raised.
pub const WARN_RATIO: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

const ONE_HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Per-category budget rule.
///
/// Categories without a configured limit are never rejected or warned.
/// Rejection needs the new category total to be strictly above the limit;
/// the warning band starts at exactly 80% of it.
#[derive(Debug)]
pub struct CategoryBudgetRule {
    /// Limit per category name
    limits: BTreeMap<String, Decimal>,
}

impl CategoryBudgetRule {
    pub fn new(limits: BTreeMap<String, Decimal>) -> Self {
        CategoryBudgetRule { limits }
    }

    fn get_limit(&self, category: &str) -> Option<Decimal> {
        self.limits.get(category).copied()
    }
}

/// Truncated percentage of `limit` used by `total`, capped at 100.
///
/// A zero limit is fully used by anything that reaches it. Scaling happens
/// before the division unless that would overflow.
pub fn usage_percentage(total: Decimal, limit: Decimal) -> u32 {
    if limit.is_zero() {
        return 100;
    }

    let percent = total
        .checked_mul(ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(limit))
        .or_else(|| {
            total
                .checked_div(limit)
                .and_then(|ratio| ratio.checked_mul(ONE_HUNDRED))
        });

    match percent {
        Some(p) if p.is_sign_negative() => 0,
        Some(p) => p.trunc().to_u32().unwrap_or(100).min(100),
        None => 100,
    }
}

impl BudgetRule for CategoryBudgetRule {
    fn id(&self) -> &'static str {
        codes::CATEGORY_BUDGET
    }

    fn evaluate(&self, txn: &TransactionSnapshot) -> Option<Verdict> {
        let limit = self.get_limit(&txn.category)?;

        // Past the top of the range is over any limit; past the bottom is under it
        let (new_category_total, over) = match txn.projected_category_total() {
            Some(total) => (total, total > limit),
            None if txn.amount.is_sign_negative() => return None,
            None => (txn.overflow_bound(), true),
        };

        if over {
            return Some(Verdict::Rejected(RejectReason::CategoryBudgetExceeded {
                category: txn.category.clone(),
                category_total: txn.category_total,
                amount: txn.amount,
                new_category_total,
                limit,
            }));
        }

        if new_category_total >= limit * WARN_RATIO {
            return Some(Verdict::Warned(WarnReason::ApproachingCategoryLimit {
                category: txn.category.clone(),
                new_category_total,
                limit,
                percentage: usage_percentage(new_category_total, limit),
            }));
        }

        None
    }
}
