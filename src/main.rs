use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::info;

use spendguard::api::{create_router, AppState};
use spendguard::config::Config;
use spendguard::graph::build_default_graph;
use spendguard::observability::init_tracing;
use spendguard::policy::{load_graph, load_ruleset};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Initialize tracing
    init_tracing(&config.log_level, config.log_json);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting spendguard budget engine"
    );

    // Rules and graph are loaded once; a bad file stops startup
    let ruleset = load_ruleset(&config.rules_path)?;
    info!(
        path = %config.rules_path.display(),
        max_total_budget = %ruleset.thresholds.max_total_budget,
        categories = ruleset.thresholds.max_category_budget.len(),
        "Loaded budget rules"
    );

    let graph = match config.graph_path {
        Some(ref path) => {
            let graph = load_graph(path)?;
            info!(path = %path.display(), nodes = graph.node_count(), "Loaded store graph");
            graph
        }
        None => {
            let graph = build_default_graph();
            info!(nodes = graph.node_count(), "Using built-in store graph");
            graph
        }
    };

    // Create application state
    let state = Arc::new(AppState::new(ruleset, graph, config.latency_budget_ms));
    info!(rules = ?state.chain.rule_ids(), "Rule chain compiled");

    // Create router
    let app = create_router(state);

    // Parse listen address
    let addr: SocketAddr = config.listen_addr.parse()?;

    info!(addr = %addr, "Starting HTTP server");

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server with graceful shutdown
    if config.graceful_shutdown {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
    } else {
        axum::serve(listener, app).await?;
    }

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
