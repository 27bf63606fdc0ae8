//! Request and Response Types for the HTTP API
//!
//! The aggregation request and report themselves live in [`crate::types`];
//! this module holds the transport-only payloads.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests
    pub status: &'static str,
}

/// Error body returned for rejected requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable reason
    pub error: String,
}

/// Example request body shown on the root endpoint
#[derive(Debug, Serialize)]
pub struct ExampleBody {
    /// Regions available in the loaded dataset
    pub regions: Vec<String>,
    /// Example threshold
    pub threshold_ms: f64,
}

/// Usage entry for `POST /`
#[derive(Debug, Serialize)]
pub struct PostUsage {
    /// Example JSON body
    pub body: ExampleBody,
}

/// Endpoint documentation
#[derive(Debug, Serialize)]
pub struct Usage {
    /// Aggregation endpoint
    #[serde(rename = "POST /")]
    pub post_root: PostUsage,
    /// Liveness endpoint
    #[serde(rename = "GET /health")]
    pub get_health: &'static str,
}

/// Root informational response
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    /// Service name
    pub message: &'static str,
    /// Endpoint documentation
    pub usage: Usage,
}

/// Error raised by a handler, rendered as `{"error": ...}`
#[derive(Debug)]
pub struct ApiError {
    /// Response status
    pub status: StatusCode,
    /// Rendered as the `error` field
    pub message: String,
}

impl ApiError {
    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// 500 Internal Server Error
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}
