use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{RuleSet, TransactionSnapshot};
use crate::rules::limits::WARN_RATIO;

/// Category whose limit applies to categories without one of their own.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Usage percentages are capped here for display.
const MAX_USAGE_PERCENT: u32 = 999;

const ONE_HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Coarse budget status shown next to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    Ok,
    NearLimit,
    OverspendRisk,
}

/// Where overall and category spending would stand after a transaction.
///
/// Unlike the rule chain, this never skips a category: when a category has
/// no limit of its own, the `Other` limit applies, then the total budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub current_total: Decimal,
    pub new_category_total: Decimal,
    pub total_limit: Decimal,
    pub category_limit: Decimal,
    pub remaining_total: Decimal,
    pub remaining_category: Decimal,
    pub total_usage_percent: u32,
    pub category_usage_percent: u32,
    pub health: BudgetHealth,
}

impl BudgetSummary {
    pub fn compute(ruleset: &RuleSet, txn: &TransactionSnapshot) -> Self {
        let total_limit = ruleset.thresholds.max_total_budget;
        let category_limit = ruleset
            .category_limit(&txn.category)
            .or_else(|| ruleset.category_limit(FALLBACK_CATEGORY))
            .unwrap_or(total_limit);

        let (current_total, total_over) = project(txn.projected_total(), txn, total_limit);
        let (new_category_total, category_over) =
            project(txn.projected_category_total(), txn, category_limit);

        let total_usage_percent = capped_percentage(current_total, total_limit);
        let category_usage_percent = capped_percentage(new_category_total, category_limit);

        let near_threshold = (WARN_RATIO * ONE_HUNDRED).to_u32().unwrap_or(80);

        let health = if txn.is_budget_exceeded || total_over || category_over {
            BudgetHealth::OverspendRisk
        } else if total_usage_percent >= near_threshold || category_usage_percent >= near_threshold
        {
            BudgetHealth::NearLimit
        } else {
            BudgetHealth::Ok
        };

        BudgetSummary {
            current_total,
            new_category_total,
            total_limit,
            category_limit,
            remaining_total: remaining(total_limit, current_total),
            remaining_category: remaining(category_limit, new_category_total),
            total_usage_percent,
            category_usage_percent,
            health,
        }
    }
}

/// Saturate an overflowed projection and report whether it is over `limit`.
fn project(
    projected: Option<Decimal>,
    txn: &TransactionSnapshot,
    limit: Decimal,
) -> (Decimal, bool) {
    match projected {
        Some(total) => (total, total > limit),
        None => (txn.overflow_bound(), !txn.amount.is_sign_negative()),
    }
}

fn remaining(limit: Decimal, used: Decimal) -> Decimal {
    limit
        .checked_sub(used)
        .unwrap_or(Decimal::MAX)
        .max(Decimal::ZERO)
}

fn capped_percentage(value: Decimal, limit: Decimal) -> u32 {
    if limit.is_zero() {
        return 0;
    }

    let percent = value
        .checked_mul(ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(limit))
        .or_else(|| {
            value
                .checked_div(limit)
                .and_then(|ratio| ratio.checked_mul(ONE_HUNDRED))
        });

    let Some(percent) = percent else {
        return if value.is_sign_negative() {
            0
        } else {
            MAX_USAGE_PERCENT
        };
    };

    if percent.is_sign_negative() {
        return 0;
    }

    percent
        .trunc()
        .to_u32()
        .unwrap_or(MAX_USAGE_PERCENT)
        .min(MAX_USAGE_PERCENT)
}
