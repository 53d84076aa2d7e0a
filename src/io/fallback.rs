//! Bundled dummy dataset shown when the statistics endpoint is unusable

use crate::domain::types::{RawFeed, TransactionFeed};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Raw JSON of the dummy dataset (10 motorcycle transactions on 2024-06-14)
pub const DUMMY_FEED_JSON: &str = include_str!("../../data/dummy_transactions.json");

/// Parse a feed body, dropping records that fail validation with a warning
pub fn parse_feed(body: &str) -> anyhow::Result<TransactionFeed> {
    let raw: RawFeed = serde_json::from_str(body).context("Failed to parse transaction feed")?;
    let (feed, rejected) = TransactionFeed::from_raw(raw);
    for err in &rejected {
        warn!(error = %format!("{err:#}"), "transaction_rejected");
    }
    Ok(feed)
}

/// The dummy dataset as a validated feed
pub fn dummy_feed() -> TransactionFeed {
    // Validated by test_dummy_feed_parses
    parse_feed(DUMMY_FEED_JSON).unwrap_or_default()
}

/// Read a feed from a local JSON file
pub fn load_feed_file<P: AsRef<Path>>(path: P) -> anyhow::Result<TransactionFeed> {
    let path = path.as_ref();
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read feed file {}", path.display()))?;
    parse_feed(&body).with_context(|| format!("Invalid feed file {}", path.display()))
}
