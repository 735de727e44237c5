use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::domain::RuleSet;
use crate::graph::{GraphError, GraphSeed, RelationshipStore};

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Document formats accepted for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.json` files are JSON; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Parse and validate a rule set from a YAML document.
pub fn ruleset_from_yaml(content: &str) -> Result<RuleSet, ConfigError> {
    let ruleset: RuleSet = serde_yaml::from_str(content)?;
    validate_ruleset(&ruleset)?;
    Ok(ruleset)
}

/// Parse and validate a rule set from a JSON document.
pub fn ruleset_from_json(content: &str) -> Result<RuleSet, ConfigError> {
    let ruleset: RuleSet = serde_json::from_str(content)?;
    validate_ruleset(&ruleset)?;
    Ok(ruleset)
}

/// Load a rule set from a YAML or JSON file.
pub fn load_ruleset(path: impl AsRef<Path>) -> Result<RuleSet, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    match Format::from_path(path) {
        Format::Json => ruleset_from_json(&content),
        Format::Yaml => ruleset_from_yaml(&content),
    }
}

/// Load a relationship store from a YAML or JSON seed file.
pub fn load_graph(path: impl AsRef<Path>) -> Result<RelationshipStore, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let seed: GraphSeed = match Format::from_path(path) {
        Format::Json => serde_json::from_str(&content)?,
        Format::Yaml => serde_yaml::from_str(&content)?,
    };

    Ok(RelationshipStore::from_seed(&seed)?)
}

/// Validate rule set limits. All thresholds must be non-negative.
fn validate_ruleset(ruleset: &RuleSet) -> Result<(), ConfigError> {
    let thresholds = &ruleset.thresholds;

    check_non_negative("thresholds.min_amount", thresholds.min_amount)?;
    check_non_negative("thresholds.max_total_budget", thresholds.max_total_budget)?;

    for (category, limit) in &thresholds.max_category_budget {
        check_non_negative(&format!("thresholds.max_category_budget.{}", category), *limit)?;
    }

    Ok(())
}

fn check_non_negative(field: &str, value: Decimal) -> Result<(), ConfigError> {
    if value < Decimal::ZERO {
        return Err(ConfigError::Validation(format!(
            "{} cannot be negative (got {})",
            field, value
        )));
    }
    Ok(())
}
