//! parkir-stats - statistics snapshot for the parking admin console
//!
//! Fetches the transaction feed, aggregates it for the chosen time scope and
//! prints the dashboard snapshot as JSON on stdout.
//!
//! Module structure:
//! - `domain/` - Transactions, feed envelope, time scopes
//! - `services/` - Aggregation (vehicle counts, scope filter, bucketing, report)
//! - `io/` - Statistics HTTP client, token stores, egress, mock API
//! - `infra/` - Config, logging

use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use parkir_stats::domain::{ClockTime, TimeScope, TimeWindow};
use parkir_stats::infra::{init_tracing, Config};
use parkir_stats::io::{ChainedTokenStore, Egress, StaticSource, StatsClient, TransactionSource};
use parkir_stats::services::{Dashboard, DashboardQuery};
use std::sync::Arc;
use tracing::{info, warn};

/// parkir-stats - parking transaction statistics
#[derive(Parser, Debug)]
#[command(name = "parkir-stats", version, about)]
struct Args {
    /// Path to TOML configuration file [default: $CONFIG_FILE or config/dev.toml]
    #[arg(short, long)]
    config: Option<String>,

    /// Time scope: today, 7days, 1month, 1year or all
    #[arg(short, long)]
    scope: Option<TimeScope>,

    /// Start of today's hourly window (HH:MM)
    #[arg(long)]
    start: Option<ClockTime>,

    /// End of today's hourly window (HH:MM)
    #[arg(long)]
    end: Option<ClockTime>,

    /// Statistics API host, overrides the config
    #[arg(long)]
    host: Option<String>,

    /// Read the feed from a JSON file instead of the API
    #[arg(long, conflicts_with = "offline")]
    feed_file: Option<String>,

    /// Use the bundled dummy dataset instead of the API
    #[arg(long)]
    offline: bool,

    /// Append the snapshot to this JSONL file, overrides the config
    #[arg(short, long)]
    output: Option<String>,

    /// Pretty-print the snapshot
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, load_error) = Config::load(args.config.as_deref());

    init_tracing(config.log_format());

    if let Some(e) = load_error {
        warn!(error = %format!("{e:#}"), "config_load_failed_using_defaults");
    }

    info!(version = env!("CARGO_PKG_VERSION"), git = env!("GIT_HASH"), "parkir_stats_starting");

    if let Some(host) = &args.host {
        config = config.with_api_host(host);
    }

    let query = DashboardQuery::new(
        args.scope.unwrap_or(config.scope()),
        TimeWindow::new(
            args.start.unwrap_or(config.window().start),
            args.end.unwrap_or(config.window().end),
        ),
    );

    info!(
        config_file = %config.config_file(),
        stats_url = %config.stats_url(),
        scope = %query.scope,
        start = %query.window.start,
        end = %query.window.end,
        "config_loaded"
    );

    let source: Box<dyn TransactionSource> = if let Some(path) = &args.feed_file {
        Box::new(StaticSource::from_file(path)?)
    } else if args.offline {
        Box::new(StaticSource::dummy())
    } else {
        let tokens = Arc::new(ChainedTokenStore::from_config(&config));
        Box::new(StatsClient::new(&config, tokens)?)
    };
    let (feed, origin) = source.fetch().await?;

    let snapshot = Dashboard::build(&feed, &query, Utc::now()).with_origin(origin);

    let json = if args.pretty {
        serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?
    } else {
        serde_json::to_string(&snapshot).context("Failed to serialize snapshot")?
    };
    println!("{json}");

    // An explicit --output must succeed; the configured file is best effort
    if let Some(path) = &args.output {
        if !Egress::new(path).write_snapshot(&snapshot) {
            bail!("Failed to write snapshot to {path}");
        }
    } else if let Some(path) = config.egress_file() {
        Egress::new(path).write_snapshot(&snapshot);
    }

    info!(origin = %origin.as_str(), "parkir_stats_done");
    Ok(())
}
