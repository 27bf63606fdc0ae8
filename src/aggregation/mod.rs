//! Region Aggregation Engine
//!
//! Computes per-region latency and uptime summaries from the telemetry
//! store.
//!
//! ```text
//! RegionQuery ──► RegionAggregator ──► TelemetryStore::for_region
//!                      │
//!                      ▼
//!        mean / percentile / breach_count
//!                      │
//!                      ▼
//!          round_to (output boundary only)
//!                      │
//!                      ▼
//!                RegionReport
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use latency_analytics::aggregation::RegionAggregator;
//! use latency_analytics::storage::TelemetryStore;
//!
//! let aggregator = RegionAggregator::new(Arc::new(TelemetryStore::embedded()));
//! let summaries = aggregator.aggregate(&["apac".to_string(), "xyz".to_string()], 200.0);
//!
//! assert_eq!(summaries.len(), 1);
//! assert_eq!(summaries[0].p95_latency, 221.19);
//! assert_eq!(summaries[0].breaches, 4);
//! ```

/// Scalar statistics (percentile, mean, breach count, rounding)
pub mod functions;
/// Per-region summary aggregation
pub mod region;

pub use functions::{breach_count, mean, percentile, round_to};
pub use region::{RegionAggregator, LATENCY_PERCENTILE};
