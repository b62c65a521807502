//! Customer Service CLI Server
//!
//! Headless REST service for customer records, suitable for deployment
//! as a systemd service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/customer-service/config.toml)
//! customer-service
//!
//! # Custom config path
//! customer-service --config /etc/customer-service/config.toml
//!
//! # Override the port
//! customer-service --port 8081
//!
//! # Validate config without starting
//! customer-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use customer_service::config::AppConfig;
use customer_service::server::{init_tracing, ServerHandle, ServerOptions};
use customer_service::shared::errors::AppError;

/// Customer Service: REST API for managing customer records.
#[derive(Parser, Debug)]
#[command(
    name = "customer-service",
    version,
    about = "REST service for managing customer records",
    long_about = "Customer Service: REST API (with Swagger UI) to create, list, \
                  update and delete customers.\n\n\
                  Default config: ~/.config/customer-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CUSTOMER_SERVICE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(customer_service::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::from_env(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            if cli.check {
                return Err(AppError::from(e).into());
            }
            error!("Using default configuration with environment overrides.");
        }
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Backend     : {:?}", config.database.backend);
        println!("   Database    : {}", config.database.redacted_url());
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    Ok(())
}
