//! Aggregation Functions Library
//!
//! Scalar statistics used to build region summaries:
//!
//! - `percentile`: linear-interpolation ("inclusive") percentile
//! - `mean`: arithmetic mean
//! - `breach_count`: observations strictly above a threshold
//! - `round_to`: decimal rounding applied at the output boundary
//!
//! All functions take plain slices and never reorder their input.
//!
//! # Example
//!
//! ```rust
//! use latency_analytics::aggregation::functions::{percentile, round_to};
//!
//! let p95 = percentile(&[10.0, 20.0, 30.0, 40.0], 95.0);
//! assert_eq!(round_to(p95, 2), 38.5);
//! ```

// ============================================================================
// Percentile
// ============================================================================

/// Percentile of `values` using linear interpolation between closest ranks
///
/// The rank is zero-based: `rank = (p / 100) * (n - 1)`. An integral rank
/// selects that element of the sorted values; otherwise the result is
/// interpolated between the elements at `floor(rank)` and `floor(rank) + 1`.
///
/// Returns 0.0 for an empty slice. `p` is clamped to `[0, 100]`.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    if rank.fract() == 0.0 {
        return sorted[lower];
    }

    let fraction = rank - lower as f64;
    sorted[lower] + fraction * (sorted[lower + 1] - sorted[lower])
}

// ============================================================================
// Mean / Threshold
// ============================================================================

/// Arithmetic mean, summed in input order
///
/// Returns NaN for an empty slice; callers only pass non-empty input.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Number of values strictly greater than `threshold`
pub fn breach_count(values: &[f64], threshold: f64) -> usize {
    values.iter().filter(|&&v| v > threshold).count()
}

// ============================================================================
// Rounding
// ============================================================================

/// Round to `decimals` places
///
/// Formatting with a fixed precision rounds the exact binary value of `value`
/// with ties-to-even, so a stored 2.675 (really 2.67499999...) becomes 2.67.
/// Non-finite values are returned unchanged.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", decimals, value)
        .parse()
        .unwrap_or(value)
}
