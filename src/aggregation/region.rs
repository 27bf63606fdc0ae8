//! Per-region summary aggregation
//!
//! Turns a list of region identifiers and a latency threshold into one
//! `RegionSummary` per region that has telemetry. Regions with no matching
//! records are omitted from the output instead of being zero-filled.

use std::sync::Arc;

use tracing::debug;

use super::functions::{breach_count, mean, percentile, round_to};
use crate::storage::TelemetryStore;
use crate::types::{RegionQuery, RegionReport, RegionSummary};

/// Percentile reported as `p95_latency`
pub const LATENCY_PERCENTILE: f64 = 95.0;

/// Decimal places for latency statistics
pub const LATENCY_DECIMALS: usize = 2;

/// Decimal places for uptime statistics
pub const UPTIME_DECIMALS: usize = 3;

/// Stateless aggregator over a shared, read-only telemetry store
///
/// Cloning is cheap and clones share the same store.
#[derive(Debug, Clone)]
pub struct RegionAggregator {
    store: Arc<TelemetryStore>,
}

impl RegionAggregator {
    /// Create an aggregator reading from `store`
    pub fn new(store: Arc<TelemetryStore>) -> Self {
        Self { store }
    }

    /// The store this aggregator reads
    pub fn store(&self) -> &TelemetryStore {
        &self.store
    }

    /// Summarise each requested region in request order
    ///
    /// Unknown regions produce no entry. Duplicate regions produce one entry
    /// each. `threshold_ms` is used as given, negative values included.
    /// Nothing outside the returned vector is touched; callers record
    /// metrics themselves.
    pub fn aggregate(&self, regions: &[String], threshold_ms: f64) -> Vec<RegionSummary> {
        let mut summaries = Vec::with_capacity(regions.len());

        for region in regions {
            match self.summarize(region, threshold_ms) {
                Some(summary) => summaries.push(summary),
                None => debug!(region = %region, "No telemetry for region, skipping"),
            }
        }

        summaries
    }

    /// Run a decoded query and wrap the result for serialization
    pub fn aggregate_query(&self, query: &RegionQuery) -> RegionReport {
        RegionReport {
            regions: self.aggregate(&query.regions, query.threshold_ms),
        }
    }

    /// Summary for a single region, or `None` when it has no records
    pub fn summarize(&self, region: &str, threshold_ms: f64) -> Option<RegionSummary> {
        let rows = self.store.for_region(region);
        if rows.is_empty() {
            return None;
        }

        let latencies: Vec<f64> = rows.iter().map(|r| r.latency_ms).collect();
        let uptimes: Vec<f64> = rows.iter().map(|r| r.uptime_pct).collect();

        Some(RegionSummary {
            region: region.to_string(),
            avg_latency: round_to(mean(&latencies), LATENCY_DECIMALS),
            p95_latency: round_to(percentile(&latencies, LATENCY_PERCENTILE), LATENCY_DECIMALS),
            avg_uptime: round_to(mean(&uptimes), UPTIME_DECIMALS),
            breaches: breach_count(&latencies, threshold_ms),
        })
    }
}
