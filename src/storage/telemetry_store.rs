//! Immutable telemetry table
//!
//! A `TelemetryStore` is built once at startup and never mutated afterwards.
//! Lookups borrow from the store; nothing is sorted or filtered in place.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use super::dataset::EMBEDDED_TELEMETRY;
use crate::error::{Error, Result};
use crate::types::TelemetryRecord;

/// Fixed, non-empty, ordered sequence of telemetry records
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryStore {
    records: Vec<TelemetryRecord>,
}

impl TelemetryStore {
    /// Store backed by the built-in dataset
    pub fn embedded() -> Self {
        let records = EMBEDDED_TELEMETRY
            .iter()
            .map(|&(region, service, latency_ms, uptime_pct, timestamp)| {
                TelemetryRecord::new(region, service, latency_ms, uptime_pct, timestamp)
            })
            .collect();

        Self { records }
    }

    /// Build a store from caller-supplied records
    ///
    /// Fails with [`Error::EmptyDataset`] when `records` is empty and with
    /// [`Error::InvalidRecord`] for the first record that violates the data
    /// model. Record order is preserved.
    pub fn from_records(records: Vec<TelemetryRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }

        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|reason| Error::InvalidRecord { index, reason })?;
        }

        Ok(Self { records })
    }

    /// Load a store from a JSON array of records
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let records: Vec<TelemetryRecord> = serde_json::from_str(&contents)?;

        debug!(
            path = %path.display(),
            records = records.len(),
            "Loaded telemetry dataset"
        );

        Self::from_records(records)
    }

    /// All records in load order
    pub fn records(&self) -> &[TelemetryRecord] {
        &self.records
    }

    /// Records whose region matches exactly, in load order
    ///
    /// The comparison is case-sensitive. An unknown region yields an empty
    /// vector.
    pub fn for_region(&self, region: &str) -> Vec<&TelemetryRecord> {
        self.records.iter().filter(|r| r.region == region).collect()
    }

    /// Distinct regions in first-seen order
    pub fn regions(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.region.as_str())
            .filter(|region| seen.insert(*region))
            .collect()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; a store holds at least one record
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for TelemetryStore {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn record(region: &str, latency_ms: f64) -> TelemetryRecord {
        TelemetryRecord::new(region, "checkout", latency_ms, 99.0, 20250301)
    }

    #[test]
    fn test_embedded_dataset_shape() {
        let store = TelemetryStore::embedded();
        assert_eq!(store.len(), 36);
        assert!(!store.is_empty());
        assert_eq!(store.regions(), vec!["apac", "emea", "amer"]);
        for region in ["apac", "emea", "amer"] {
            assert_eq!(store.for_region(region).len(), 12);
        }
    }

    #[test]
    fn test_embedded_dataset_is_valid() {
        let store = TelemetryStore::embedded();
        let rebuilt = TelemetryStore::from_records(store.records().to_vec()).unwrap();
        assert_eq!(rebuilt, store);
    }

    #[test]
    fn test_for_region_preserves_order() {
        let store = TelemetryStore::from_records(vec![
            record("a", 3.0),
            record("b", 1.0),
            record("a", 1.0),
            record("a", 2.0),
        ])
        .unwrap();

        let latencies: Vec<f64> = store.for_region("a").iter().map(|r| r.latency_ms).collect();
        assert_eq!(latencies, vec![3.0, 1.0, 2.0]);
        // Underlying order is untouched
        assert_eq!(store.records()[0].latency_ms, 3.0);
    }

    #[test]
    fn test_for_region_is_case_sensitive() {
        let store = TelemetryStore::embedded();
        assert!(store.for_region("APAC").is_empty());
        assert!(store.for_region(" apac").is_empty());
        assert!(store.for_region("xyz").is_empty());
    }

    #[test]
    fn test_from_records_rejects_empty() {
        assert!(matches!(
            TelemetryStore::from_records(vec![]),
            Err(Error::EmptyDataset)
        ));
    }

    #[test]
    fn test_from_records_reports_invalid_index() {
        let result = TelemetryStore::from_records(vec![record("a", 1.0), record("a", -5.0)]);
        match result {
            Err(Error::InvalidRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"region": "nordics", "service": "search", "latency_ms": 80.5, "uptime_pct": 99.9, "timestamp": 20250401}},
                {{"region": "nordics", "service": "search", "latency_ms": 91.0, "uptime_pct": 99.1, "timestamp": 20250402}}
            ]"#
        )
        .unwrap();

        let store = TelemetryStore::from_json_file(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.regions(), vec!["nordics"]);
    }

    #[test]
    fn test_from_json_file_errors() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        assert!(matches!(
            TelemetryStore::from_json_file(file.path()),
            Err(Error::EmptyDataset)
        ));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            TelemetryStore::from_json_file(file.path()),
            Err(Error::Serialization(_))
        ));

        assert!(matches!(
            TelemetryStore::from_json_file("/nonexistent/telemetry.json"),
            Err(Error::Io(_))
        ));
    }
}
