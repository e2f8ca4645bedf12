//! Network Performance Optimizer
//!
//! Single binary serving the REST API:
//! - POST /analyze, /optimize, /predict
//! - GET  /, /health, /metrics

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use netopt_control::config::{parse_listen_addr, ServiceConfig};
use netopt_control::state::AppState;

/// Network Performance Optimizer service.
#[derive(Parser, Debug)]
#[command(name = "netopt-control", about = "Link analysis and bandwidth optimisation API")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, env = "NETOPT_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address; overrides `server.listen_addr` from the config file.
    #[arg(long, env = "LISTEN_ADDR")]
    listen_addr: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging ─────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // ── Config ──────────────────────────────────────────────────
    let mut config = ServiceConfig::load(cli.config.as_deref())?;
    if let Some(addr) = cli.listen_addr.as_deref() {
        config.server.listen_addr = parse_listen_addr(addr)?;
    }

    tracing::info!(
        config = ?cli.config,
        candidates = config.grid.points(),
        min_factor = config.grid.min_factor(),
        max_factor = config.grid.max_factor(),
        "configuration loaded"
    );

    // ── Router ──────────────────────────────────────────────────
    let addr = config.server.listen_addr;
    let app = netopt_control::app(AppState::new(config));

    // ── Listen ──────────────────────────────────────────────────
    tracing::info!("netopt-control listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("netopt-control stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
