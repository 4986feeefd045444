//! DefenseSpend proxy entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use defensespend::api::{create_router, AppState};
use defensespend::config::Config;
use defensespend::metrics;
use defensespend::spending::UsaSpendingClient;
use defensespend::utils::shutdown_signal;

/// Read-only HTTP proxy over the USAspending API.
#[derive(Parser, Debug)]
#[command(name = "defensespend")]
#[command(about = "HTTP proxy over the USAspending API for Department of Defense contract data")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    let mut config = Config::load()?;
    if args.verbose {
        config.verbose = true;
    }

    // Initialize logging
    let filter = if config.verbose {
        EnvFilter::new("defensespend=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(args.json_logs.then(|| fmt::layer().json()))
        .with((!args.json_logs).then(fmt::layer))
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve { port }) => cmd_serve(config, port.or(args.port)).await,
        None => cmd_serve(config, args.port).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("DEFENSESPEND - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    print!("Building upstream client... ");
    match UsaSpendingClient::new(config) {
        Ok(_) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Upstream client construction failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Upstream: {}", config.usaspending_base_url);
    match config.http_timeout_ms {
        Some(ms) => println!("  Upstream Timeout: {}ms", ms),
        None => println!("  Upstream Timeout: transport default"),
    }
    println!("  Port: {}", config.port);
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let client = UsaSpendingClient::new(&config)?;
    info!("Upstream: {}", client.base_url());

    let mut app_state = AppState::new(Arc::new(client));

    if config.metrics_enabled {
        match metrics::install_prometheus() {
            Ok(handle) => app_state = app_state.with_metrics(handle),
            Err(e) => warn!("Failed to install Prometheus recorder, metrics disabled: {}", e),
        }
    }

    let port = port_override.unwrap_or(config.port);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
