use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::RuleSet;
use crate::evaluator::BudgetSummary;
use crate::graph::{RelationshipStore, OTHER_CATEGORY};
use crate::observability::{MetricsRegistry, TimingGuard};
use crate::rules::RuleChain;

use super::request::{CategorySource, CheckRequest};
use super::response::{
    CategoryResponse, CheckResponse, ErrorResponse, HealthResponse, NeighborsResponse,
    ReadyResponse, StoresResponse,
};

/// Shared application state.
///
/// Everything here is built once at startup and only read afterwards.
pub struct AppState {
    /// Rule set the chain was compiled from
    pub ruleset: Arc<RuleSet>,

    /// Compiled rule chain
    pub chain: Arc<RuleChain>,

    /// Store/category relationships
    pub graph: Arc<RelationshipStore>,

    pub metrics: Arc<MetricsRegistry>,

    /// Application start time
    pub start_time: Instant,

    /// Application version
    pub version: String,

    /// Latency budget in milliseconds
    pub latency_budget_ms: u64,
}

impl AppState {
    /// Build state from a loaded rule set and graph.
    pub fn new(ruleset: RuleSet, graph: RelationshipStore, latency_budget_ms: u64) -> Self {
        let chain = RuleChain::from_ruleset(&ruleset);

        AppState {
            ruleset: Arc::new(ruleset),
            chain: Arc::new(chain),
            graph: Arc::new(graph),
            metrics: Arc::new(MetricsRegistry::new()),
            start_time: Instant::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            latency_budget_ms,
        }
    }
}

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/transactions/check", post(handle_check))
        .route("/v1/stores/:name/category", get(handle_store_category))
        .route("/v1/categories/:name/stores", get(handle_category_stores))
        .route("/v1/nodes/:id/neighbors", get(handle_neighbors))
        .route("/health", get(handle_health))
        .route("/ready", get(handle_ready))
        .route("/metrics", get(handle_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle transaction check requests.
async fn handle_check(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckRequest>,
) -> impl IntoResponse {
    let start = Instant::now();
    let _timer = TimingGuard::new(&state.metrics);

    let (category, source) = req.resolve_category(&state.graph);
    if source == CategorySource::Classified {
        state
            .metrics
            .record_classification(category != OTHER_CATEGORY);
    }

    let txn = req.to_snapshot(category.clone());
    let verdict = state.chain.evaluate(&txn);
    let summary = BudgetSummary::compute(&state.ruleset, &txn);

    state.metrics.record_verdict(&verdict);

    let elapsed = start.elapsed();
    if elapsed.as_millis() > state.latency_budget_ms as u128 {
        warn!(
            latency_ms = elapsed.as_millis(),
            budget_ms = state.latency_budget_ms,
            "Check latency exceeded budget"
        );
    }

    let date = req.date.map(|d| d.to_string());
    info!(
        category = %category,
        store = req.store.as_deref().unwrap_or("-"),
        description = req.description.as_deref().unwrap_or(""),
        date = date.as_deref().unwrap_or("-"),
        severity = %verdict.severity(),
        code = verdict.code(),
        latency_us = elapsed.as_micros(),
        "Check completed"
    );

    (
        StatusCode::OK,
        Json(CheckResponse::new(verdict, category, source, summary)),
    )
}

/// Classify a store.
async fn handle_store_category(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let category = state.graph.category_for_store(&name).to_string();
    state
        .metrics
        .record_classification(category != OTHER_CATEGORY);

    Json(CategoryResponse {
        store: name,
        category,
    })
}

/// List the stores of a category.
async fn handle_category_stores(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let stores = state
        .graph
        .stores_in_category(&name)
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(StoresResponse {
        category: name,
        stores,
    })
}

/// Direct neighbors of any node.
async fn handle_neighbors(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let kind = state.graph.kind(&id);
    let neighbors = state.graph.neighbors(&id).to_vec();

    Json(NeighborsResponse {
        id,
        kind,
        neighbors,
    })
}

/// Health check endpoint.
async fn handle_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Readiness check endpoint.
async fn handle_ready(State(state): State<Arc<AppState>>) -> axum::response::Response {
    if state.chain.is_empty() || state.graph.node_count() == 0 {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new("Rules or graph not loaded", "NOT_READY")),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(ReadyResponse {
            ready: true,
            rules: state.chain.rule_ids(),
            graph_nodes: state.graph.node_count(),
            graph_edges: state.graph.edge_count(),
        }),
    )
        .into_response()
}

/// Metrics endpoint (Prometheus format).
async fn handle_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let metrics = format!(
        r#"# HELP spendguard_uptime_seconds Application uptime in seconds
# TYPE spendguard_uptime_seconds counter
spendguard_uptime_seconds {}

# HELP spendguard_rules Number of rules in the chain
# TYPE spendguard_rules gauge
spendguard_rules {}

# HELP spendguard_graph_nodes Number of nodes in the store graph
# TYPE spendguard_graph_nodes gauge
spendguard_graph_nodes {}

{}"#,
        state.start_time.elapsed().as_secs(),
        state.chain.len(),
        state.graph.node_count(),
        state.metrics.to_prometheus(),
    );

    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; charset=utf-8",
        )],
        metrics,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_default_graph;
    use crate::observability::tracing::init_test_tracing;
    use crate::policy::ruleset_from_yaml;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    const RULES_YAML: &str = r#"
critical_rules:
  block_if_budget_exceeded: true
  must_not_exceed_total_budget: true
  must_not_exceed_category_budget: true
thresholds:
  min_amount: 0
  max_total_budget: 10000
  max_category_budget:
    Transport: 5000
    Food: 3000
lists:
  blacklist: ["fraud"]
  whitelist: ["verified"]
"#;

    fn test_app_state() -> Arc<AppState> {
        init_test_tracing();
        let ruleset = ruleset_from_yaml(RULES_YAML).unwrap();
        Arc::new(AppState::new(ruleset, build_default_graph(), 100))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn check_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/transactions/check")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(test_app_state());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_check_classifies_store() {
        let state = test_app_state();
        let app = create_router(state.clone());

        let response = app
            .oneshot(check_request(r#"{"store": "Uber", "amount": 4500}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["category"], "Transport");
        assert_eq!(json["category_source"], "classified");
        assert_eq!(json["severity"], "WARNED");
        assert_eq!(json["code"], "R5_CATEGORY_BUDGET");
        assert_eq!(json["verdict"]["detail"]["percentage"], 90);
        assert_eq!(json["summary"]["health"], "near_limit");

        assert_eq!(
            state
                .metrics
                .verdicts_warned
                .load(std::sync::atomic::Ordering::Relaxed),
            1
        );
    }

    #[tokio::test]
    async fn test_check_out_of_range_amount_is_rejected() {
        let app = create_router(test_app_state());

        let response = app
            .oneshot(check_request(
                r#"{"category": "Food", "amount": "79228162514264337593543950335", "total_spent": "1", "date": "2025-03-14"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["severity"], "REJECTED");
        assert_eq!(json["code"], "R4_TOTAL_BUDGET");
        assert_eq!(json["summary"]["health"], "overspend_risk");
        assert_eq!(json["summary"]["total_usage_percent"], 999);
    }

    #[tokio::test]
    async fn test_check_blocked_by_blacklist() {
        let app = create_router(test_app_state());

        let response = app
            .oneshot(check_request(
                r#"{"category": "Food", "amount": 100, "tags": ["fraud"]}"#,
            ))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["severity"], "BLOCKED");
        assert_eq!(json["evidence"]["value"], "fraud");
    }

    #[tokio::test]
    async fn test_check_rejects_malformed_body() {
        let app = create_router(test_app_state());

        let response = app
            .oneshot(check_request(r#"{"store": "Uber"}"#))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_store_category_endpoint() {
        let app = create_router(test_app_state());

        let request = Request::builder()
            .uri("/v1/stores/Starbucks/category")
            .body(Body::empty())
            .unwrap();
        let json = body_json(app.oneshot(request).await.unwrap()).await;

        assert_eq!(json["category"], "Coffee");
    }

    #[tokio::test]
    async fn test_unknown_store_is_other() {
        let app = create_router(test_app_state());

        let request = Request::builder()
            .uri("/v1/stores/Unknown%20Shop/category")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["store"], "Unknown Shop");
        assert_eq!(json["category"], "Other");
    }

    #[tokio::test]
    async fn test_category_stores_endpoint() {
        let app = create_router(test_app_state());

        let request = Request::builder()
            .uri("/v1/categories/Food/stores")
            .body(Body::empty())
            .unwrap();
        let json = body_json(app.oneshot(request).await.unwrap()).await;

        assert_eq!(json["stores"], serde_json::json!(["McDonald's", "KFC"]));
    }

    #[tokio::test]
    async fn test_neighbors_endpoint() {
        let app = create_router(test_app_state());

        let request = Request::builder()
            .uri("/v1/nodes/Coffee/neighbors")
            .body(Body::empty())
            .unwrap();
        let json = body_json(app.oneshot(request).await.unwrap()).await;

        assert_eq!(json["kind"], "category");
        assert_eq!(json["neighbors"], serde_json::json!(["Starbucks", "Food"]));
    }

    #[tokio::test]
    async fn test_ready_endpoint() {
        let app = create_router(test_app_state());

        let request = Request::builder()
            .uri("/ready")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["rules"].as_array().unwrap().len(), 5);
        assert_eq!(json["graph_nodes"], 12);
    }

    #[tokio::test]
    async fn test_not_ready_without_graph() {
        let ruleset = ruleset_from_yaml(RULES_YAML).unwrap();
        let state = Arc::new(AppState::new(ruleset, RelationshipStore::new(), 100));
        let app = create_router(state);

        let request = Request::builder()
            .uri("/ready")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
