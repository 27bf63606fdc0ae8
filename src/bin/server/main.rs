//! Latency Analytics HTTP Server
//!
//! This binary serves per-region latency and uptime summaries computed from
//! a static telemetry table.
//!
//! # Endpoints
//!
//! - `POST /` - Summarise the requested regions
//! - `OPTIONS /` - CORS answer
//! - `GET /` - Request shape documentation
//! - `GET /health` - Health check
//! - `GET /metrics` - Prometheus metrics
//!
//! # CLI Commands
//!
//! - `start` - Start the HTTP server (default if no command specified)
//! - `check-config` - Validate configuration file
//! - `summarize` - Run an aggregation without starting the server
//! - `regions` - List regions in the loaded dataset
//!
//! # Configuration
//!
//! The server reads configuration from:
//! 1. `--config` flag
//! 2. `LATENCY_CONFIG` environment variable (path to TOML file)
//! 3. `./application.toml` in current directory
//! 4. Default configuration

mod config;

use clap::{Parser, Subcommand};
use config::{load_config_with_app, load_store, ServerConfig};
use latency_analytics::config::ApplicationConfig;
use latency_analytics::http::{build_router, AppState};
use latency_analytics::RegionAggregator;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::signal;
use tracing::{debug, info, warn};

// =============================================================================
// Server Setup
// =============================================================================

/// Graceful shutdown signal handler
///
/// Signal registration failures are logged and the corresponding branch waits
/// forever instead of panicking.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {},
            Err(e) => {
                warn!(
                    error = %e,
                    "Ctrl+C handler installation failed - graceful shutdown unavailable"
                );
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            },
            Err(e) => {
                warn!(
                    error = %e,
                    "SIGTERM handler installation failed - SIGTERM shutdown unavailable"
                );
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}

fn init_tracing(app_config: &ApplicationConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&app_config.server.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

// =============================================================================
// CLI Definition
// =============================================================================

/// Latency Analytics - per-region latency and uptime summaries
#[derive(Parser)]
#[command(name = "latency-analytics")]
#[command(version)]
#[command(about = "Per-region latency and uptime summaries over a static telemetry table", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to configuration file (overrides LATENCY_CONFIG env var)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override listen address (e.g., 0.0.0.0:8000)
    #[arg(short, long, global = true)]
    listen: Option<String>,

    /// Override telemetry dataset file (JSON array of records)
    #[arg(short, long, global = true)]
    dataset: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Start,

    /// Validate configuration file without starting the server
    CheckConfig,

    /// Summarise regions without starting the server
    Summarize {
        /// Regions to summarise, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        regions: Vec<String>,

        /// Latency threshold in milliseconds
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        threshold_ms: f64,

        /// Output format (text, json)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// List regions and record counts in the loaded dataset
    Regions,
}

/// Load configuration and apply CLI overrides
fn resolve_config(cli: &Cli) -> Result<(ServerConfig, ApplicationConfig), Box<dyn std::error::Error>> {
    let (_, mut app_config) = load_config_with_app(cli.config.as_ref())?;

    if let Some(listen) = &cli.listen {
        app_config.server.listen_addr = listen.clone();
    }
    if let Some(dataset) = &cli.dataset {
        app_config.telemetry.dataset_path = Some(dataset.clone());
    }
    app_config.validate()?;

    Ok((ServerConfig::from(&app_config), app_config))
}

// =============================================================================
// CLI Command Handlers
// =============================================================================

/// Validate configuration and print summary
fn cmd_check_config(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (config, app_config) = resolve_config(cli)?;
    let store = load_store(&config)?;

    println!("Configuration is valid!");
    println!();
    println!("Server Settings:");
    println!("  Listen address: {}", config.listen_addr);
    println!("  Log level: {}", app_config.server.log_level);
    println!("  Max body size: {} bytes", app_config.server.max_body_bytes);
    println!();
    println!("Telemetry:");
    match &config.dataset_path {
        Some(path) => println!("  Dataset: {}", path.display()),
        None => println!("  Dataset: built-in"),
    }
    println!("  Records: {}", store.len());
    println!("  Regions: {}", store.regions().join(", "));
    println!();
    println!("Monitoring:");
    println!(
        "  Prometheus enabled: {}",
        app_config.monitoring.prometheus_enabled
    );
    println!();
    println!("Security:");
    if app_config.security.cors_allowed_origins.is_empty() {
        println!("  CORS origins: *");
    } else {
        println!(
            "  CORS origins: {}",
            app_config.security.cors_allowed_origins.join(", ")
        );
    }

    Ok(())
}

/// Run an aggregation and print the report
fn cmd_summarize(
    cli: &Cli,
    regions: &[String],
    threshold_ms: f64,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if !threshold_ms.is_finite() {
        return Err("threshold must be a finite number".into());
    }

    let (config, _) = resolve_config(cli)?;
    let aggregator = RegionAggregator::new(Arc::new(load_store(&config)?));
    let summaries = aggregator.aggregate(regions, threshold_ms);

    if format == "json" {
        let report = latency_analytics::RegionReport { regions: summaries };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{:<12} {:>12} {:>12} {:>12} {:>9}",
            "region", "avg_latency", "p95_latency", "avg_uptime", "breaches"
        );
        for s in &summaries {
            println!(
                "{:<12} {:>12.2} {:>12.2} {:>12.3} {:>9}",
                s.region, s.avg_latency, s.p95_latency, s.avg_uptime, s.breaches
            );
        }
        let skipped = regions.len() - summaries.len();
        if skipped > 0 {
            println!();
            println!("{} requested region(s) had no telemetry", skipped);
        }
    }

    Ok(())
}

/// List regions and record counts
fn cmd_regions(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (config, _) = resolve_config(cli)?;
    let store = load_store(&config)?;

    println!("Regions ({} records)", store.len());
    for region in store.regions() {
        println!("  {}: {}", region, store.for_region(region).len());
    }

    Ok(())
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::CheckConfig) => return cmd_check_config(&cli),
        Some(Commands::Summarize {
            regions,
            threshold_ms,
            format,
        }) => return cmd_summarize(&cli, regions, *threshold_ms, format),
        Some(Commands::Regions) => return cmd_regions(&cli),
        Some(Commands::Start) | None => {
            // Continue with server startup below
        },
    }

    let (config, app_config) = resolve_config(&cli)?;
    init_tracing(&app_config);

    info!(
        "Starting Latency Analytics Server v{}",
        env!("CARGO_PKG_VERSION")
    );
    debug!(
        listen_addr = %config.listen_addr,
        dataset = ?config.dataset_path,
        "Configuration resolved"
    );

    let store = Arc::new(load_store(&config)?);
    let state = Arc::new(AppState::new(store, app_config));
    let app = build_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
