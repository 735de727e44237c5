pub mod api;
pub mod config;
pub mod domain;
pub mod evaluator;
pub mod graph;
pub mod observability;
pub mod policy;
pub mod rules;

pub use config::Config;
pub use domain::{RuleSet, Severity, TransactionSnapshot, Verdict};
pub use evaluator::{evaluate, BudgetSummary};
pub use graph::{build_default_graph, GraphError, NodeKind, RelationshipStore};
pub use policy::{load_ruleset, ConfigError};
pub use rules::{BudgetRule, RuleChain};
