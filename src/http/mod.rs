//! HTTP service for the latency analytics API
//!
//! # Endpoints
//!
//! - `POST /` - Summarise latency and uptime for the requested regions
//! - `OPTIONS /` - Explicit CORS answer (204, empty body)
//! - `GET /` - Describe the request shape
//! - `GET /health` - Liveness check
//! - `GET /metrics` - Prometheus metrics
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use latency_analytics::config::ApplicationConfig;
//! use latency_analytics::http::{build_router, AppState};
//! use latency_analytics::storage::TelemetryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState::new(Arc::new(TelemetryStore::embedded()), ApplicationConfig::default());
//! let app = build_router(Arc::new(state));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Endpoint handlers
pub mod handlers;
/// Transport-only request and response types
pub mod types;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, options},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::aggregation::RegionAggregator;
use crate::config::ApplicationConfig;
use crate::storage::TelemetryStore;

/// Shared application state
pub struct AppState {
    /// Aggregator over the process-wide telemetry store
    pub aggregator: RegionAggregator,
    /// Application configuration
    pub config: ApplicationConfig,
}

impl AppState {
    /// Create state around a loaded store
    pub fn new(store: Arc<TelemetryStore>, config: ApplicationConfig) -> Self {
        Self {
            aggregator: RegionAggregator::new(store),
            config,
        }
    }
}

/// Build CORS layer from configuration
///
/// An empty origin list allows any origin.
pub fn build_cors_layer(cors_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if cors_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "Ignoring unparsable CORS origin");
                    None
                },
            })
            .collect();
        layer.allow_origin(origins)
    }
}

/// Build the application router
///
/// `OPTIONS /` is routed outside the CORS layer, which would otherwise answer
/// every OPTIONS request itself.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.config.security.cors_allowed_origins);
    let body_limit = state.config.server.max_body_bytes;

    let api = Router::new()
        .route(
            "/",
            get(handlers::root_info).post(handlers::compute_metrics),
        )
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::prometheus_metrics))
        .layer(cors);

    Router::new()
        .route("/", options(handlers::preflight))
        .merge(api)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}
