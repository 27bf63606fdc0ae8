//! Property-based tests for the region aggregation pipeline
//!
//! Uses proptest to check percentile bounds and order independence, breach
//! count bounds, and the skip/duplicate behaviour of the aggregator over
//! generated datasets.

use std::sync::Arc;

use latency_analytics::aggregation::{percentile, RegionAggregator, LATENCY_PERCENTILE};
use latency_analytics::metrics::{REGIONS_SKIPPED, REGIONS_SUMMARIZED};
use latency_analytics::storage::TelemetryStore;
use latency_analytics::types::TelemetryRecord;
use proptest::prelude::*;

// =============================================================================
// Test Data Strategies
// =============================================================================

/// Non-negative latencies with a mix of magnitudes and repeated values
fn latency() -> impl Strategy<Value = f64> {
    prop_oneof![
        (0.0..1000.0f64),
        (0i32..50_000).prop_map(|i| i as f64 / 100.0),
        Just(0.0),
        Just(250.0),
    ]
}

/// A generated dataset over a small alphabet of regions
fn dataset() -> impl Strategy<Value = Vec<TelemetryRecord>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["north", "south", "east"]),
            latency(),
            0.0..=100.0f64,
        ),
        1..60,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (region, latency_ms, uptime_pct))| {
                TelemetryRecord::new(region, "svc", latency_ms, uptime_pct, 20250101 + i as u32)
            })
            .collect()
    })
}

// =============================================================================
// Percentile Properties
// =============================================================================

proptest! {
    /// The percentile never leaves the range of its input
    #[test]
    fn percentile_within_bounds(values in prop::collection::vec(latency(), 1..200)) {
        let p = percentile(&values, LATENCY_PERCENTILE);
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(p >= min && p <= max, "p95 {} outside [{}, {}]", p, min, max);
    }

    /// A single value is its own percentile
    #[test]
    fn percentile_of_single_value(x in latency(), p in 0.0..=100.0f64) {
        prop_assert_eq!(percentile(&[x], p), x);
    }

    /// Input order does not matter
    #[test]
    fn percentile_is_order_independent(
        (values, shuffled) in prop::collection::vec(latency(), 1..100)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        prop_assert_eq!(
            percentile(&values, LATENCY_PERCENTILE),
            percentile(&shuffled, LATENCY_PERCENTILE)
        );
    }
}

// =============================================================================
// Aggregator Properties
// =============================================================================

proptest! {
    /// Breaches are bounded by the number of matching records
    #[test]
    fn breaches_bounded_by_match_count(records in dataset(), threshold in -100.0..1100.0f64) {
        let store = TelemetryStore::from_records(records).unwrap();
        let aggregator = RegionAggregator::new(Arc::new(store));
        let regions: Vec<String> = ["north", "south", "east"].iter().map(|s| s.to_string()).collect();

        for summary in aggregator.aggregate(&regions, threshold) {
            let matching = aggregator.store().for_region(&summary.region).len();
            prop_assert!(summary.breaches <= matching);
        }
    }

    /// Only regions with telemetry appear, and duplicates repeat identically
    #[test]
    fn skips_unknown_and_repeats_duplicates(records in dataset(), threshold in 0.0..500.0f64) {
        let store = TelemetryStore::from_records(records).unwrap();
        let aggregator = RegionAggregator::new(Arc::new(store));

        let requested: Vec<String> = ["north", "unknown", "north", "east"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let summaries = aggregator.aggregate(&requested, threshold);

        let expected: Vec<&String> = requested
            .iter()
            .filter(|r| !aggregator.store().for_region(r).is_empty())
            .collect();
        prop_assert_eq!(summaries.len(), expected.len());
        prop_assert!(summaries.len() < requested.len());
        for (summary, region) in summaries.iter().zip(expected) {
            prop_assert_eq!(&summary.region, region);
        }

        let north: Vec<_> = summaries.iter().filter(|s| s.region == "north").collect();
        if north.len() == 2 {
            prop_assert_eq!(north[0], north[1]);
        }
    }

    /// A threshold below every latency counts every record as a breach
    #[test]
    fn negative_threshold_counts_all(records in dataset()) {
        let store = TelemetryStore::from_records(records).unwrap();
        let aggregator = RegionAggregator::new(Arc::new(store));

        for region in ["north", "south", "east"] {
            if let Some(summary) = aggregator.summarize(region, -1000.0) {
                prop_assert_eq!(summary.breaches, aggregator.store().for_region(region).len());
            }
        }
    }
}

// =============================================================================
// Side Effects
// =============================================================================

#[test]
fn aggregate_leaves_metrics_untouched() {
    let aggregator = RegionAggregator::new(Arc::new(TelemetryStore::embedded()));
    let summarized = REGIONS_SUMMARIZED.get();
    let skipped = REGIONS_SKIPPED.get();

    let regions: Vec<String> = ["apac", "nowhere"].iter().map(|s| s.to_string()).collect();
    assert_eq!(aggregator.aggregate(&regions, 200.0).len(), 1);

    assert_eq!(REGIONS_SUMMARIZED.get(), summarized);
    assert_eq!(REGIONS_SKIPPED.get(), skipped);
}
