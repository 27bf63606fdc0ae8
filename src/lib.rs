//! Latency Analytics - per-region latency and uptime summaries
//!
//! This library serves summary statistics over a fixed telemetry table:
//! - Immutable in-memory telemetry store, loaded once at startup
//! - Per-region mean latency, p95 latency (linear interpolation), mean
//!   uptime and threshold breach counts
//! - axum HTTP service with permissive CORS and Prometheus metrics

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

/// Prometheus metrics and telemetry
pub mod metrics;

/// Configuration management with TOML support
pub mod config;

/// Immutable telemetry table with per-region lookups
pub mod storage;

/// Region aggregation: percentile, mean, breach count and rounding
pub mod aggregation;

/// HTTP router, handlers and transport types
pub mod http;

// Re-export main types
pub use aggregation::RegionAggregator;
pub use error::{Error, Result};
pub use storage::TelemetryStore;
pub use types::{RegionQuery, RegionReport, RegionSummary, TelemetryRecord};
