use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Budget-control service configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "spendguard")]
#[command(about = "Budget-control rule engine and store classifier")]
pub struct Config {
    /// HTTP server listen address
    #[arg(long, default_value = "0.0.0.0:8080", env = "SPENDGUARD_LISTEN_ADDR")]
    pub listen_addr: String,

    /// Path to the budget rules file (YAML, or JSON with a .json extension)
    #[arg(long, default_value = "rules.yaml", env = "SPENDGUARD_RULES_PATH")]
    pub rules_path: PathBuf,

    /// Path to a store/category graph seed (built-in seed if not set)
    #[arg(long, env = "SPENDGUARD_GRAPH_PATH")]
    pub graph_path: Option<PathBuf>,

    /// Latency budget in milliseconds for the check endpoint
    #[arg(long, default_value = "10", env = "SPENDGUARD_LATENCY_BUDGET_MS")]
    pub latency_budget_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, default_value = "false", env = "SPENDGUARD_LOG_JSON")]
    pub log_json: bool,

    /// Enable graceful shutdown
    #[arg(long, default_value = "true", env = "SPENDGUARD_GRACEFUL_SHUTDOWN")]
    pub graceful_shutdown: bool,
}

impl Config {
    /// Get latency budget as Duration.
    pub fn latency_budget(&self) -> Duration {
        Duration::from_millis(self.latency_budget_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_addr: "0.0.0.0:8080".to_string(),
            rules_path: PathBuf::from("rules.yaml"),
            graph_path: None,
            latency_budget_ms: 10,
            log_level: "info".to_string(),
            log_json: false,
            graceful_shutdown: true,
        }
    }
}
