//! Core data types used throughout the service
//!
//! # Key Types
//!
//! - **`TelemetryRecord`**: one latency/uptime observation for a service in a region
//! - **`RegionQuery`**: the regions to summarise and the latency breach threshold
//! - **`RegionSummary`**: aggregated statistics for one requested region
//! - **`RegionReport`**: the ordered list of summaries returned to callers
//!
//! # Example
//!
//! ```rust
//! use latency_analytics::types::RegionQuery;
//!
//! let query: RegionQuery =
//!     serde_json::from_str(r#"{"regions": ["apac"], "threshold_ms": "180"}"#).unwrap();
//! assert_eq!(query.regions, vec!["apac".to_string()]);
//! assert_eq!(query.threshold_ms, 180.0);
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// A single telemetry observation
///
/// Only `region`, `latency_ms` and `uptime_pct` take part in aggregation.
/// `service` and `timestamp` (a `YYYYMMDD` date code) are carried along for
/// completeness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Region identifier (e.g. "apac")
    pub region: String,
    /// Service that produced the observation
    pub service: String,
    /// Observed latency in milliseconds
    pub latency_ms: f64,
    /// Observed uptime percentage in [0, 100]
    pub uptime_pct: f64,
    /// Date code, YYYYMMDD
    pub timestamp: u32,
}

impl TelemetryRecord {
    /// Create a new record
    pub fn new(
        region: impl Into<String>,
        service: impl Into<String>,
        latency_ms: f64,
        uptime_pct: f64,
        timestamp: u32,
    ) -> Self {
        Self {
            region: region.into(),
            service: service.into(),
            latency_ms,
            uptime_pct,
            timestamp,
        }
    }

    /// Check the record against the telemetry data model
    ///
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if self.region.is_empty() {
            return Err("region is empty".to_string());
        }
        if !self.latency_ms.is_finite() {
            return Err(format!("latency_ms is not finite: {}", self.latency_ms));
        }
        if self.latency_ms < 0.0 {
            return Err(format!("latency_ms is negative: {}", self.latency_ms));
        }
        if !self.uptime_pct.is_finite() || !(0.0..=100.0).contains(&self.uptime_pct) {
            return Err(format!(
                "uptime_pct must be within [0, 100], got {}",
                self.uptime_pct
            ));
        }
        Ok(())
    }
}

/// Summary statistics for one region
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    /// The region as it was requested
    pub region: String,
    /// Mean latency, rounded to 2 decimals
    pub avg_latency: f64,
    /// 95th percentile latency (linear interpolation), rounded to 2 decimals
    pub p95_latency: f64,
    /// Mean uptime, rounded to 3 decimals
    pub avg_uptime: f64,
    /// Number of observations with latency strictly above the threshold
    pub breaches: usize,
}

/// Aggregation request
///
/// Both fields are optional on the wire. `threshold_ms` accepts a JSON
/// number or a numeric string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegionQuery {
    /// Regions to summarise, in output order
    #[serde(default)]
    pub regions: Vec<String>,
    /// Latency threshold in milliseconds
    #[serde(default, deserialize_with = "deserialize_threshold")]
    pub threshold_ms: f64,
}

impl RegionQuery {
    /// Create a query for the given regions and threshold
    pub fn new<I, S>(regions: I, threshold_ms: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: regions.into_iter().map(Into::into).collect(),
            threshold_ms,
        }
    }
}

/// Aggregation response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionReport {
    /// One entry per requested region that had telemetry
    pub regions: Vec<RegionSummary>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn deserialize_threshold<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n,
        NumberOrString::Text(s) => s.trim().parse::<f64>().map_err(|_| {
            serde::de::Error::custom(format!("threshold_ms is not a number: {:?}", s))
        })?,
    };

    if !value.is_finite() {
        return Err(serde::de::Error::custom("threshold_ms must be finite"));
    }
    Ok(value)
}
