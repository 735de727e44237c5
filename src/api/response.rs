use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Evidence, Severity, Verdict};
use crate::evaluator::BudgetSummary;
use crate::graph::NodeKind;

use super::request::CategorySource;

/// Response from a transaction check.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    /// Unique identifier of this check
    pub check_id: String,

    /// Structured verdict
    pub verdict: Verdict,

    /// Severity derived from the verdict
    pub severity: Severity,

    /// Code of the rule that decided, or "OK"
    pub code: String,

    /// Human-readable verdict message
    pub message: String,

    /// Category the transaction was evaluated under
    pub category: String,

    pub category_source: CategorySource,

    /// Evidence from the rule that fired
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Evidence>,

    pub summary: BudgetSummary,

    pub evaluated_at: DateTime<Utc>,
}

impl CheckResponse {
    /// Create a check response for a verdict.
    pub fn new(
        verdict: Verdict,
        category: String,
        category_source: CategorySource,
        summary: BudgetSummary,
    ) -> Self {
        CheckResponse {
            check_id: Uuid::new_v4().to_string(),
            severity: verdict.severity(),
            code: verdict.code().to_string(),
            message: verdict.to_string(),
            evidence: verdict.evidence(),
            verdict,
            category,
            category_source,
            summary,
            evaluated_at: Utc::now(),
        }
    }
}

/// Category lookup for a store.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub store: String,
    pub category: String,
}

/// Stores attached to a category.
#[derive(Debug, Serialize)]
pub struct StoresResponse {
    pub category: String,
    pub stores: Vec<String>,
}

/// Direct neighbors of a graph node.
#[derive(Debug, Serialize)]
pub struct NeighborsResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,
    pub neighbors: Vec<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub rules: Vec<&'static str>,
    pub graph_nodes: usize,
    pub graph_edges: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            code: code.into(),
        }
    }
}
