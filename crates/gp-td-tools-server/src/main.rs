//! gp-td-tools HTTP service - Teradata DDL and mapping workbook generation.

mod handlers;
mod routes;
mod state;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, Level};

use gp_td_tools::{CatalogPool, Config, ToolError};

#[derive(Parser)]
#[command(name = "gp-td-tools-server")]
#[command(about = "Generate Teradata DDL and mapping workbooks from Greenplum metadata")]
#[command(version)]
struct Cli {
    /// Bind address for the HTTP listener
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: String,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ToolError> {
    let cli = Cli::parse();
    setup_logging(&cli.verbosity, &cli.log_format);

    // Configuration is read once here and then only passed by reference.
    let config = Config::from_env()?;
    let pool = CatalogPool::connect(&config.catalog).await?;

    let state = Arc::new(state::AppState { pool, config });
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    info!("Listening on {}", cli.bind);
    info!("   POST /ddl/download       - Teradata DDL as a .sql attachment");
    info!("   POST /mappings/generate/ - mapping workbook as an .xlsx attachment");
    info!("   GET  /health             - liveness and pool status");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => tracing::warn!("Failed to listen for shutdown signal: {}", e),
    }
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
