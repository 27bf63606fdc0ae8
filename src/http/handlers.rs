//! HTTP Handlers for the latency analytics API

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{debug, error, warn};

use super::types::*;
use super::AppState;
use crate::metrics;
use crate::types::{RegionQuery, RegionReport};

/// Example threshold shown on the root endpoint
const EXAMPLE_THRESHOLD_MS: f64 = 200.0;

// =============================================================================
// Info & Health Handlers
// =============================================================================

/// Describe the request shape accepted by `POST /`
pub async fn root_info(State(state): State<Arc<AppState>>) -> Json<InfoResponse> {
    metrics::record_request("GET /", 200);

    let regions = state
        .aggregator
        .store()
        .regions()
        .into_iter()
        .map(String::from)
        .collect();

    Json(InfoResponse {
        message: "Latency Analytics API",
        usage: Usage {
            post_root: PostUsage {
                body: ExampleBody {
                    regions,
                    threshold_ms: EXAMPLE_THRESHOLD_MS,
                },
            },
            get_health: "returns {status: 'ok'}",
        },
    })
}

/// Liveness check
pub async fn health() -> Json<HealthResponse> {
    metrics::record_request("GET /health", 200);
    Json(HealthResponse { status: "ok" })
}

/// Answer to `OPTIONS /`, including browser preflights
pub async fn preflight() -> impl IntoResponse {
    metrics::record_request("OPTIONS /", 204);
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "*"),
        ],
    )
}

// =============================================================================
// Aggregation Handler
// =============================================================================

/// Summarise the requested regions
///
/// The body is decoded as JSON regardless of `Content-Type`. Unknown regions
/// are left out of the report.
pub async fn compute_metrics(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<RegionReport>, ApiError> {
    let query: RegionQuery = match serde_json::from_slice(&body) {
        Ok(query) => query,
        Err(e) => {
            warn!(error = %e, "Rejected aggregation request");
            metrics::record_request("POST /", 400);
            return Err(ApiError::bad_request(format!("Invalid request body: {}", e)));
        },
    };

    let start = Instant::now();
    let report = state.aggregator.aggregate_query(&query);
    metrics::record_aggregation(
        report.regions.len(),
        query.regions.len() - report.regions.len(),
        start.elapsed().as_secs_f64(),
    );
    debug!(
        requested = query.regions.len(),
        returned = report.regions.len(),
        threshold_ms = query.threshold_ms,
        "Aggregated regions"
    );

    metrics::record_request("POST /", 200);
    Ok(Json(report))
}

// =============================================================================
// Metrics Handler
// =============================================================================

/// Prometheus metrics in text exposition format
pub async fn prometheus_metrics(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.config.monitoring.prometheus_enabled {
        return Err(ApiError::not_found("Metrics endpoint is disabled"));
    }

    let text = metrics::gather_metrics().map_err(|e| {
        error!(error = %e, "Failed to gather metrics");
        ApiError::internal(e)
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        text,
    ))
}
