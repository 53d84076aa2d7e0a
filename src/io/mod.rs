//! IO modules - external system interfaces
//!
//! This module contains all external IO operations:
//! - `api_client` - HTTP client for the statistics endpoint
//! - `token_store` - Bearer token sources (env var, cookie file)
//! - `fallback` - Bundled dummy dataset and feed file loading
//! - `egress` - Dashboard snapshot output to file (JSONL format)
//! - `mock_api` - Mock statistics HTTP endpoint

pub mod api_client;
pub mod egress;
pub mod fallback;
pub mod mock_api;
pub mod token_store;

// Re-export commonly used types
pub use api_client::{StaticSource, StatsClient, TransactionSource};
pub use egress::Egress;
pub use fallback::{dummy_feed, load_feed_file, parse_feed};
pub use mock_api::MockApiState;
pub use token_store::{
    ChainedTokenStore, CookieFileTokenStore, EnvTokenStore, StaticTokenStore, TokenStore,
};
