//! Server Configuration
//!
//! This module handles loading configuration and the telemetry dataset.

use latency_analytics::config::ApplicationConfig;
use latency_analytics::storage::TelemetryStore;
use std::path::PathBuf;
use tracing::info;

/// Environment variable naming a TOML config file
pub const CONFIG_ENV_VAR: &str = "LATENCY_CONFIG";

/// Server runtime configuration derived from ApplicationConfig
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP server address
    pub listen_addr: String,

    /// Telemetry dataset file (None = built-in dataset)
    pub dataset_path: Option<PathBuf>,
}

impl From<&ApplicationConfig> for ServerConfig {
    fn from(app_config: &ApplicationConfig) -> Self {
        Self {
            listen_addr: app_config.server.listen_addr.clone(),
            dataset_path: app_config.telemetry.dataset_path.clone(),
        }
    }
}

/// Load configuration from file or environment
///
/// Priority:
/// 1. `explicit` path (from `--config`)
/// 2. LATENCY_CONFIG environment variable
/// 3. application.toml
/// 4. Default configuration with environment overrides
///
/// A file named by 1 or 2 must load and validate. Only a broken
/// application.toml falls back to defaults.
pub fn load_config_with_app(
    explicit: Option<&PathBuf>,
) -> latency_analytics::Result<(ServerConfig, ApplicationConfig)> {
    let requested = explicit
        .cloned()
        .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));

    if let Some(path) = requested {
        let config = ApplicationConfig::load(&path)?;
        eprintln!("[config] Loaded configuration from: {}", path.display());
        return Ok((ServerConfig::from(&config), config));
    }

    let app_toml_path = std::path::Path::new("application.toml");
    if app_toml_path.exists() {
        match ApplicationConfig::load(app_toml_path) {
            Ok(config) => {
                eprintln!("[config] Loaded configuration from application.toml");
                return Ok((ServerConfig::from(&config), config));
            },
            Err(e) => {
                eprintln!(
                    "[config] Failed to parse application.toml: {}. Using defaults.",
                    e
                );
            },
        }
    }

    eprintln!("[config] Using default configuration");
    let app_config = ApplicationConfig::from_env();
    Ok((ServerConfig::from(&app_config), app_config))
}

/// Load the telemetry store named by the configuration
pub fn load_store(config: &ServerConfig) -> latency_analytics::Result<TelemetryStore> {
    match &config.dataset_path {
        Some(path) => {
            let store = TelemetryStore::from_json_file(path)?;
            info!(
                path = %path.display(),
                records = store.len(),
                "Telemetry dataset loaded from file"
            );
            Ok(store)
        },
        None => {
            let store = TelemetryStore::embedded();
            info!(records = store.len(), "Using built-in telemetry dataset");
            Ok(store)
        },
    }
}
