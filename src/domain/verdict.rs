use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Evidence;

/// Stable codes for the rules in the evaluation chain.
pub mod codes {
    pub const BUDGET_EXCEEDED: &str = "R1_BUDGET_EXCEEDED";
    pub const MIN_AMOUNT: &str = "R2_MIN_AMOUNT";
    pub const BLACKLIST: &str = "R3_BLACKLIST";
    pub const TOTAL_BUDGET: &str = "R4_TOTAL_BUDGET";
    pub const CATEGORY_BUDGET: &str = "R5_CATEGORY_BUDGET";
    pub const OK: &str = "OK";
}

/// Verdict severity, ordered from least to most severe.
///
/// Presentation layers map this to styling; nothing in the core does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Severity {
    /// Transaction complies with every rule
    Approved = 0,
    /// Allowed, but close to a configured limit
    Warned = 1,
    /// Refused because a budget limit would be exceeded
    Rejected = 2,
    /// Refused by a hard filter
    Blocked = 3,
}

impl Severity {
    /// Returns the more severe of two severities.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        std::cmp::max(self, other)
    }

    /// Returns true if the transaction may go ahead.
    #[inline]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Severity::Approved | Severity::Warned)
    }

    /// Returns the severity rank (0-3).
    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Parse from string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "APPROVED" => Some(Severity::Approved),
            "WARNED" => Some(Severity::Warned),
            "REJECTED" => Some(Severity::Rejected),
            "BLOCKED" => Some(Severity::Blocked),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Approved => write!(f, "APPROVED"),
            Severity::Warned => write!(f, "WARNED"),
            Severity::Rejected => write!(f, "REJECTED"),
            Severity::Blocked => write!(f, "BLOCKED"),
        }
    }
}

/// Why a hard filter blocked the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockReason {
    BudgetAlreadyExceeded,
    AmountBelowMinimum { amount: Decimal, min_amount: Decimal },
    BlacklistedTag { tag: String },
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::BudgetAlreadyExceeded => write!(f, "global budget already exceeded"),
            BlockReason::AmountBelowMinimum { amount, min_amount } => {
                write!(f, "amount below minimum ({} < {})", amount, min_amount)
            }
            BlockReason::BlacklistedTag { tag } => write!(f, "blacklisted tag: {}", tag),
        }
    }
}

/// Why a budget limit rejected the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    TotalBudgetExceeded {
        current_total: Decimal,
        limit: Decimal,
    },
    CategoryBudgetExceeded {
        category: String,
        category_total: Decimal,
        amount: Decimal,
        new_category_total: Decimal,
        limit: Decimal,
    },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::TotalBudgetExceeded {
                current_total,
                limit,
            } => write!(
                f,
                "total budget exceeded (limit {}, current total {})",
                limit, current_total
            ),
            RejectReason::CategoryBudgetExceeded {
                category,
                category_total,
                amount,
                new_category_total,
                limit,
            } => write!(
                f,
                "category budget exceeded for '{}' (limit {}, spent {}, amount {}, total {})",
                category, limit, category_total, amount, new_category_total
            ),
        }
    }
}

/// Why an allowed transaction carries a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarnReason {
    ApproachingCategoryLimit {
        category: String,
        new_category_total: Decimal,
        limit: Decimal,
        /// Truncated integer share of the limit in use
        percentage: u32,
    },
}

impl fmt::Display for WarnReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarnReason::ApproachingCategoryLimit {
                category,
                new_category_total,
                limit,
                percentage,
            } => write!(
                f,
                "approaching category limit for '{}' (used {} of {}, {}%)",
                category, new_category_total, limit, percentage
            ),
        }
    }
}

/// Annotation attached to an approved transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApprovalNote {
    WhitelistedTag { tag: String },
}

impl fmt::Display for ApprovalNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalNote::WhitelistedTag { tag } => write!(f, "whitelisted tag: {}", tag),
        }
    }
}

/// Outcome of evaluating one transaction against a rule chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum Verdict {
    Blocked(BlockReason),
    Rejected(RejectReason),
    Warned(WarnReason),
    Approved(Option<ApprovalNote>),
}

impl Verdict {
    /// Plain approval with no note.
    pub fn approved() -> Self {
        Verdict::Approved(None)
    }

    pub fn severity(&self) -> Severity {
        match self {
            Verdict::Blocked(_) => Severity::Blocked,
            Verdict::Rejected(_) => Severity::Rejected,
            Verdict::Warned(_) => Severity::Warned,
            Verdict::Approved(_) => Severity::Approved,
        }
    }

    /// Code of the rule that produced this verdict, or `OK` for approvals.
    pub fn code(&self) -> &'static str {
        match self {
            Verdict::Blocked(BlockReason::BudgetAlreadyExceeded) => codes::BUDGET_EXCEEDED,
            Verdict::Blocked(BlockReason::AmountBelowMinimum { .. }) => codes::MIN_AMOUNT,
            Verdict::Blocked(BlockReason::BlacklistedTag { .. }) => codes::BLACKLIST,
            Verdict::Rejected(RejectReason::TotalBudgetExceeded { .. }) => codes::TOTAL_BUDGET,
            Verdict::Rejected(RejectReason::CategoryBudgetExceeded { .. }) => {
                codes::CATEGORY_BUDGET
            }
            Verdict::Warned(WarnReason::ApproachingCategoryLimit { .. }) => codes::CATEGORY_BUDGET,
            Verdict::Approved(_) => codes::OK,
        }
    }

    /// Audit evidence for the rule that fired. Approvals carry none.
    pub fn evidence(&self) -> Option<Evidence> {
        let code = self.code();
        let evidence = match self {
            Verdict::Blocked(BlockReason::BudgetAlreadyExceeded) => {
                Evidence::new(code, "is_budget_exceeded", "true")
            }
            Verdict::Blocked(BlockReason::AmountBelowMinimum { amount, min_amount }) => {
                Evidence::with_limit(code, "amount", amount.to_string(), min_amount.to_string())
            }
            Verdict::Blocked(BlockReason::BlacklistedTag { tag }) => {
                Evidence::new(code, "tag", tag.as_str())
            }
            Verdict::Rejected(RejectReason::TotalBudgetExceeded {
                current_total,
                limit,
            }) => Evidence::with_limit(
                code,
                "total_spent",
                current_total.to_string(),
                limit.to_string(),
            ),
            Verdict::Rejected(RejectReason::CategoryBudgetExceeded {
                new_category_total,
                limit,
                ..
            })
            | Verdict::Warned(WarnReason::ApproachingCategoryLimit {
                new_category_total,
                limit,
                ..
            }) => Evidence::with_limit(
                code,
                "category_total",
                new_category_total.to_string(),
                limit.to_string(),
            ),
            Verdict::Approved(_) => return None,
        };
        Some(evidence)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Blocked(reason) => write!(f, "blocked: {}", reason),
            Verdict::Rejected(reason) => write!(f, "rejected: {}", reason),
            Verdict::Warned(reason) => write!(f, "warning: {}", reason),
            Verdict::Approved(None) => write!(f, "approved: transaction complies with budget rules"),
            Verdict::Approved(Some(note)) => write!(
                f,
                "approved: transaction complies with budget rules ({})",
                note
            ),
        }
    }
}
