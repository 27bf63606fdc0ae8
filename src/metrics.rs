//! Metrics and telemetry for the latency analytics service
//!
//! Prometheus metrics covering HTTP request outcomes and aggregation work.

use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_histogram, Counter, CounterVec, Encoder,
    Histogram, TextEncoder,
};

lazy_static! {
    /// Total HTTP requests by endpoint and status code
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        "latency_requests_total",
        "Total HTTP requests by endpoint and status",
        &["endpoint", "status"]
    ).expect("latency_requests_total registration");

    /// Regions that produced a summary
    pub static ref REGIONS_SUMMARIZED: Counter = register_counter!(
        "latency_regions_summarized_total",
        "Total region summaries produced"
    ).expect("latency_regions_summarized_total registration");

    /// Requested regions with no telemetry
    pub static ref REGIONS_SKIPPED: Counter = register_counter!(
        "latency_regions_skipped_total",
        "Total requested regions skipped for lack of telemetry"
    ).expect("latency_regions_skipped_total registration");

    /// Time spent in a single aggregation call
    pub static ref AGGREGATION_DURATION: Histogram = register_histogram!(
        "latency_aggregation_duration_seconds",
        "Aggregation latency in seconds",
        vec![0.00001, 0.0001, 0.001, 0.01, 0.1]
    ).expect("latency_aggregation_duration_seconds registration");
}

/// Get metrics in Prometheus text format
pub fn gather_metrics() -> Result<String, String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];

    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| format!("Failed to encode metrics: {}", e))?;

    String::from_utf8(buffer).map_err(|e| format!("Metrics contain invalid UTF-8: {}", e))
}

/// Record a handled HTTP request
#[inline]
pub fn record_request(endpoint: &str, status: u16) {
    REQUESTS_TOTAL
        .with_label_values(&[endpoint, &status.to_string()])
        .inc();
}

/// Record the outcome of one aggregation call
#[inline]
pub fn record_aggregation(summarized: usize, skipped: usize, duration_secs: f64) {
    REGIONS_SUMMARIZED.inc_by(summarized as f64);
    REGIONS_SKIPPED.inc_by(skipped as f64);
    AGGREGATION_DURATION.observe(duration_secs);
}
