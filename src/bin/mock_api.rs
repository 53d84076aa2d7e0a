//! Mock statistics API server
//!
//! Serves the transaction feed the admin console reads, for local testing
//! without the real backend.
//!
//! Behavior:
//! 1. Listens on the configured address (default 127.0.0.1:3000)
//! 2. `GET /api/statistic/transaksi` with `Authorization: Bearer <token>`
//!    returns the feed (bundled dummy dataset unless a dataset file is set)
//! 3. Wrong or missing token answers 401
//!
//! Usage:
//!   cargo run --bin parkir-mock-api -- --port 3000 --token dev-token

use anyhow::Context;
use clap::Parser;
use parkir_stats::infra::{init_tracing, Config};
use parkir_stats::io::MockApiState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "parkir-mock-api")]
#[command(about = "Mock parking statistics API for local development")]
struct Args {
    /// Path to TOML configuration file [default: $CONFIG_FILE or config/dev.toml]
    #[arg(short, long)]
    config: Option<String>,

    /// TCP port to listen on, overrides the config
    #[arg(short, long)]
    port: Option<u16>,

    /// Bearer token clients must present, overrides the config
    #[arg(short, long)]
    token: Option<String>,

    /// JSON feed file to serve instead of the dummy dataset
    #[arg(short, long)]
    dataset: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let (config, load_error) = Config::load(args.config.as_deref());

    init_tracing(config.log_format());

    if let Some(e) = load_error {
        warn!(error = %format!("{e:#}"), "config_load_failed_using_defaults");
    }

    let mut state = MockApiState::from_config(&config)?;
    if let Some(token) = args.token {
        state = state.with_token(token);
    }
    if let Some(path) = &args.dataset {
        let feed_json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read mock dataset {path}"))?;
        state = state.with_feed_json(feed_json);
    }

    let port = args.port.unwrap_or(config.mock_port());
    let addr: SocketAddr = format!("{}:{}", config.mock_bind_address(), port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown_signal_received");
        let _ = shutdown_tx.send(true);
    });

    parkir_stats::io::mock_api::serve(listener, Arc::new(state), shutdown_rx).await
}
