//! Error types for the latency analytics service
//!
//! Aggregation itself never fails: a region with no telemetry is omitted
//! from the report rather than surfaced as an error. The variants here cover
//! building a telemetry store and loading configuration.

use thiserror::Error;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A telemetry store must hold at least one record
    #[error("Telemetry dataset is empty")]
    EmptyDataset,

    /// A record violates the telemetry data model
    #[error("Invalid telemetry record at index {index}: {reason}")]
    InvalidRecord {
        /// Position of the record in the dataset
        index: usize,
        /// What was wrong with it
        reason: String,
    },
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_record_display() {
        let err = Error::InvalidRecord {
            index: 3,
            reason: "latency_ms is negative".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid telemetry record at index 3: latency_ms is negative"
        );
    }

    #[test]
    fn test_json_error_maps_to_serialization() {
        let json_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
