//! Built-in telemetry dataset
//!
//! Twelve daily observations (2025-03-01 through 2025-03-12) for each of the
//! `apac`, `emea` and `amer` regions. Served when no dataset file is
//! configured.

/// (region, service, latency_ms, uptime_pct, timestamp)
pub(crate) const EMBEDDED_TELEMETRY: &[(&str, &str, f64, f64, u32)] = &[
    ("apac", "checkout", 222.81, 97.728, 20250301),
    ("apac", "support", 144.2, 99.283, 20250302),
    ("apac", "catalog", 194.04, 97.357, 20250303),
    ("apac", "catalog", 140.25, 98.887, 20250304),
    ("apac", "recommendations", 129.1, 98.783, 20250305),
    ("apac", "checkout", 181.91, 97.72, 20250306),
    ("apac", "payments", 218.04, 97.511, 20250307),
    ("apac", "support", 161.74, 98.452, 20250308),
    ("apac", "payments", 219.86, 98.609, 20250309),
    ("apac", "analytics", 162.1, 97.802, 20250310),
    ("apac", "catalog", 172.95, 99.432, 20250311),
    ("apac", "analytics", 214.36, 97.432, 20250312),
    ("emea", "payments", 166.72, 98.22, 20250301),
    ("emea", "payments", 211.69, 99.137, 20250302),
    ("emea", "support", 216.79, 98.775, 20250303),
    ("emea", "support", 203.64, 98.918, 20250304),
    ("emea", "checkout", 194.79, 98.375, 20250305),
    ("emea", "catalog", 131.75, 99.351, 20250306),
    ("emea", "checkout", 128.8, 98.397, 20250307),
    ("emea", "recommendations", 222.15, 97.589, 20250308),
    ("emea", "recommendations", 224.38, 98.129, 20250309),
    ("emea", "recommendations", 150.01, 99.199, 20250310),
    ("emea", "analytics", 146.37, 97.77, 20250311),
    ("emea", "catalog", 163.99, 98.849, 20250312),
    ("amer", "recommendations", 127.43, 97.503, 20250301),
    ("amer", "payments", 199.65, 98.623, 20250302),
    ("amer", "payments", 231.09, 98.399, 20250303),
    ("amer", "analytics", 210.59, 98.44, 20250304),
    ("amer", "analytics", 200.28, 98.966, 20250305),
    ("amer", "analytics", 169.44, 97.459, 20250306),
    ("amer", "catalog", 125.88, 97.401, 20250307),
    ("amer", "recommendations", 210.5, 97.113, 20250308),
    ("amer", "checkout", 130.4, 97.401, 20250309),
    ("amer", "catalog", 177.2, 98.175, 20250310),
    ("amer", "support", 212.25, 97.907, 20250311),
    ("amer", "recommendations", 166.12, 97.318, 20250312),
];
