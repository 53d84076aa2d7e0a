//! HTTP client for the statistics endpoint
//!
//! Fetches `{totalTransaksi, transaksi}` with a bearer token. Upstream
//! failures degrade to the bundled dummy dataset instead of reaching the
//! dashboard; a missing token is returned to the caller.

use crate::domain::types::{FeedOrigin, TransactionFeed};
use crate::infra::config::Config;
use crate::io::fallback::{dummy_feed, load_feed_file, parse_feed};
use crate::io::token_store::TokenStore;
use anyhow::{bail, Context};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Anything that can produce the full transaction feed
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// The feed and where it actually came from
    async fn fetch(&self) -> anyhow::Result<(TransactionFeed, FeedOrigin)>;
}

pub struct StatsClient {
    url: String,
    http_client: reqwest::Client,
    tokens: Arc<dyn TokenStore>,
}

impl StatsClient {
    pub fn new(config: &Config, tokens: Arc<dyn TokenStore>) -> anyhow::Result<Self> {
        // Create HTTP client once for reuse (connection pooling)
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.api_timeout_ms()))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { url: config.stats_url(), http_client, tokens })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_with_token(&self, token: &str) -> anyhow::Result<TransactionFeed> {
        let start = Instant::now();

        let response = self
            .http_client
            .get(&self.url)
            .bearer_auth(token)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("HTTP error! status: {}", status.as_u16());
        }

        let body = response.text().await.context("Failed to read response body")?;
        let feed = parse_feed(&body)?;

        info!(
            url = %self.url,
            status = %status.as_u16(),
            total = %feed.total,
            transactions = %feed.transactions.len(),
            latency_ms = %start.elapsed().as_millis(),
            "feed_fetched"
        );

        Ok(feed)
    }

    /// Fetch the live feed, failing on any upstream error
    pub async fn fetch_live(&self) -> anyhow::Result<TransactionFeed> {
        let token = self.tokens.require_token()?;
        self.fetch_with_token(&token).await
    }

    /// Fetch the live feed, or the dummy dataset if the endpoint fails.
    ///
    /// Errors only when no token is available.
    pub async fn fetch_or_fallback(&self) -> anyhow::Result<(TransactionFeed, FeedOrigin)> {
        let token = self.tokens.require_token()?;

        match self.fetch_with_token(&token).await {
            Ok(feed) => Ok((feed, FeedOrigin::Live)),
            Err(e) => {
                error!(url = %self.url, error = %format!("{e:#}"), "feed_fetch_failed");
                Ok((dummy_feed(), FeedOrigin::Fallback))
            }
        }
    }
}

#[async_trait]
impl TransactionSource for StatsClient {
    async fn fetch(&self) -> anyhow::Result<(TransactionFeed, FeedOrigin)> {
        self.fetch_or_fallback().await
    }
}

/// Feed held in memory (feed file, offline mode)
pub struct StaticSource {
    feed: TransactionFeed,
    origin: FeedOrigin,
}

impl StaticSource {
    pub fn new(feed: TransactionFeed, origin: FeedOrigin) -> Self {
        Self { feed, origin }
    }

    /// The bundled dummy dataset
    pub fn dummy() -> Self {
        Self::new(dummy_feed(), FeedOrigin::Fallback)
    }

    /// Feed read from a local JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self::new(load_feed_file(path)?, FeedOrigin::File))
    }
}

#[async_trait]
impl TransactionSource for StaticSource {
    async fn fetch(&self) -> anyhow::Result<(TransactionFeed, FeedOrigin)> {
        Ok((self.feed.clone(), self.origin))
    }
}
