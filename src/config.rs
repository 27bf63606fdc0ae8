//! Configuration management for the latency analytics service
//!
//! TOML configuration with environment variable overrides and sensible
//! defaults. Every section and field is optional in the file.
//!
//! ```toml
//! [server]
//! listen_addr = "0.0.0.0:8000"
//! log_level = "info"
//! max_body_bytes = 1048576
//!
//! [telemetry]
//! dataset_path = "telemetry.json"
//!
//! [monitoring]
//! prometheus_enabled = true
//!
//! [security]
//! cors_allowed_origins = []
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Log levels accepted by `server.log_level`
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ApplicationConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSection,

    /// Telemetry dataset source
    #[serde(default)]
    pub telemetry: TelemetrySection,

    /// Monitoring and observability
    #[serde(default)]
    pub monitoring: MonitoringSection,

    /// Security settings
    #[serde(default)]
    pub security: SecuritySection,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerSection {
    /// Address the HTTP server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum accepted request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Telemetry configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TelemetrySection {
    /// JSON file holding the telemetry table (None = built-in dataset)
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
}

/// Monitoring configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MonitoringSection {
    /// Serve Prometheus metrics on `/metrics`
    #[serde(default = "default_true")]
    pub prometheus_enabled: bool,
}

/// Security configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SecuritySection {
    /// CORS allowed origins (empty = allow any origin)
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

// Default value functions
fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_max_body_bytes() -> usize {
    1024 * 1024
}
fn default_true() -> bool {
    true
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            log_level: default_log_level(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for MonitoringSection {
    fn default() -> Self {
        Self {
            prometheus_enabled: true,
        }
    }
}

impl ApplicationConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&contents).map_err(|e| {
            Error::Configuration(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load from a file, apply environment overrides, and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Apply environment variable overrides
    ///
    /// - `LATENCY_LISTEN_ADDR` → `server.listen_addr`
    /// - `LATENCY_DATASET` → `telemetry.dataset_path`
    /// - `LATENCY_CORS_ORIGINS` (comma separated) → `security.cors_allowed_origins`
    /// - `RUST_LOG` → `server.log_level`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var("LATENCY_LISTEN_ADDR") {
            self.server.listen_addr = addr;
        }

        if let Ok(path) = std::env::var("LATENCY_DATASET") {
            if !path.trim().is_empty() {
                self.telemetry.dataset_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(origins) = std::env::var("LATENCY_CORS_ORIGINS") {
            self.security.cors_allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        if let Ok(log_level) = std::env::var("RUST_LOG") {
            self.server.log_level = log_level;
        }
    }

    /// Validate configuration
    ///
    /// `log_level` may be a bare level or a full `EnvFilter` directive
    /// string; only bare words are checked against the known levels.
    pub fn validate(&self) -> Result<()> {
        if self.server.listen_addr.trim().is_empty() {
            return Err(Error::Configuration(
                "Listen address cannot be empty".to_string(),
            ));
        }

        if self.server.max_body_bytes == 0 {
            return Err(Error::Configuration(
                "Max body bytes must be > 0".to_string(),
            ));
        }

        let level = self.server.log_level.trim();
        let is_directive = level.contains('=') || level.contains(',');
        if !is_directive && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            return Err(Error::Configuration(format!(
                "Unknown log level '{}', expected one of {:?}",
                self.server.log_level, LOG_LEVELS
            )));
        }

        if let Some(path) = &self.telemetry.dataset_path {
            if path.as_os_str().is_empty() {
                return Err(Error::Configuration(
                    "Dataset path cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Configuration(format!("Failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ApplicationConfig::default();
        assert_eq!(config.server.listen_addr, "0.0.0.0:8000");
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.server.max_body_bytes, 1024 * 1024);
        assert!(config.telemetry.dataset_path.is_none());
        assert!(config.monitoring.prometheus_enabled);
        assert!(config.security.cors_allowed_origins.is_empty());
    }

    #[test]
    fn test_config_validation() {
        assert!(ApplicationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_listen_addr() {
        let mut config = ApplicationConfig::default();
        config.server.listen_addr = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_body_limit() {
        let mut config = ApplicationConfig::default();
        config.server.max_body_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_validation() {
        let mut config = ApplicationConfig::default();
        config.server.log_level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.server.log_level = "DEBUG".to_string();
        assert!(config.validate().is_ok());

        config.server.log_level = "latency_analytics=debug,tower_http=info".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[server]
listen_addr = "127.0.0.1:9100"

[security]
cors_allowed_origins = ["https://dashboard.example.com"]
"#
        )
        .unwrap();

        let config = ApplicationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:9100");
        assert_eq!(config.server.log_level, "info");
        assert!(config.monitoring.prometheus_enabled);
        assert_eq!(
            config.security.cors_allowed_origins,
            vec!["https://dashboard.example.com".to_string()]
        );
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[server\nlisten_addr = ").unwrap();
        assert!(matches!(
            ApplicationConfig::from_file(file.path()),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = ApplicationConfig::default();
        config.telemetry.dataset_path = Some(PathBuf::from("/srv/telemetry.json"));
        let text = config.to_toml().unwrap();
        let parsed: ApplicationConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("LATENCY_LISTEN_ADDR", "127.0.0.1:9999");
        std::env::set_var("LATENCY_CORS_ORIGINS", "https://a.example, ,https://b.example");
        let config = ApplicationConfig::from_env();
        std::env::remove_var("LATENCY_LISTEN_ADDR");
        std::env::remove_var("LATENCY_CORS_ORIGINS");

        assert_eq!(config.server.listen_addr, "127.0.0.1:9999");
        assert_eq!(
            config.security.cors_allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }
}
