pub mod loader;

pub use loader::{load_graph, load_ruleset, ruleset_from_json, ruleset_from_yaml, ConfigError};
