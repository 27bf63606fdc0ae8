//! Telemetry storage
//!
//! The service reads from a single in-memory table that is loaded once at
//! startup, either from the built-in dataset or from a JSON file, and stays
//! read-only for the lifetime of the process.
//!
//! # Example
//!
//! ```rust
//! use latency_analytics::storage::TelemetryStore;
//!
//! let store = TelemetryStore::embedded();
//! assert_eq!(store.for_region("apac").len(), 12);
//! assert!(store.for_region("xyz").is_empty());
//! ```

mod dataset;
/// Immutable record table with per-region lookups
pub mod telemetry_store;

pub use telemetry_store::TelemetryStore;
