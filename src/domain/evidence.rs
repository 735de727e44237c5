use serde::{Deserialize, Serialize};

/// Evidence captured when a rule fires.
///
/// Gives the caller an audit trail of why a verdict was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// The rule that fired
    pub rule_id: String,

    /// Key identifying what was checked (e.g., "amount", "tag", "category_total")
    pub key: String,

    /// The actual value that fired the rule
    pub value: String,

    /// The threshold/limit that was crossed (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl Evidence {
    /// Create evidence for a rule hit.
    pub fn new(rule_id: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Evidence {
            rule_id: rule_id.into(),
            key: key.into(),
            value: value.into(),
            limit: None,
        }
    }

    /// Create evidence with a limit/threshold.
    pub fn with_limit(
        rule_id: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        limit: impl Into<String>,
    ) -> Self {
        Evidence {
            rule_id: rule_id.into(),
            key: key.into(),
            value: value.into(),
            limit: Some(limit.into()),
        }
    }
}
