//! Bearer token sources for the statistics client

use crate::infra::config::Config;
use anyhow::{bail, Context};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Provides the bearer token for authenticated requests
pub trait TokenStore: Send + Sync {
    /// `Ok(None)` when no token is stored
    fn token(&self) -> anyhow::Result<Option<String>>;

    /// Token or an error naming the store
    fn require_token(&self) -> anyhow::Result<String> {
        match self.token()? {
            Some(token) => Ok(token),
            None => bail!("token not found in {}", self.describe()),
        }
    }

    fn describe(&self) -> String;
}

/// Extract a cookie value from a `name=value; other=value` string
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Token fixed at construction
pub struct StaticTokenStore {
    token: Option<String>,
}

impl StaticTokenStore {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: Some(token.into()) }
    }

    pub fn empty() -> Self {
        Self { token: None }
    }
}

impl TokenStore for StaticTokenStore {
    fn token(&self) -> anyhow::Result<Option<String>> {
        Ok(self.token.clone())
    }

    fn describe(&self) -> String {
        "static token".to_string()
    }
}

/// Token read from an environment variable
pub struct EnvTokenStore {
    var: String,
}

impl EnvTokenStore {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl TokenStore for EnvTokenStore {
    fn token(&self) -> anyhow::Result<Option<String>> {
        Ok(std::env::var(&self.var).ok().filter(|v| !v.trim().is_empty()))
    }

    fn describe(&self) -> String {
        format!("environment variable {}", self.var)
    }
}

/// Token read from a file holding a browser-style cookie string
pub struct CookieFileTokenStore {
    path: PathBuf,
    cookie_name: String,
}

impl CookieFileTokenStore {
    pub fn new(path: impl Into<PathBuf>, cookie_name: impl Into<String>) -> Self {
        Self { path: path.into(), cookie_name: cookie_name.into() }
    }
}

impl TokenStore for CookieFileTokenStore {
    fn token(&self) -> anyhow::Result<Option<String>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "cookie_file_missing");
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read cookie file {}", self.path.display()))?;
        Ok(content.lines().find_map(|line| cookie_value(line, &self.cookie_name)))
    }

    fn describe(&self) -> String {
        format!("cookie {:?} in {}", self.cookie_name, self.path.display())
    }
}

/// Tries each store in order, first token wins
pub struct ChainedTokenStore {
    stores: Vec<Box<dyn TokenStore>>,
}

impl ChainedTokenStore {
    pub fn new(stores: Vec<Box<dyn TokenStore>>) -> Self {
        Self { stores }
    }

    /// Cookie file (if configured), then the environment variable
    pub fn from_config(config: &Config) -> Self {
        let mut stores: Vec<Box<dyn TokenStore>> = Vec::new();
        if let Some(path) = config.cookie_file() {
            stores.push(Box::new(CookieFileTokenStore::new(path, config.cookie_name())));
        }
        stores.push(Box::new(EnvTokenStore::new(config.token_env())));
        Self { stores }
    }
}

impl TokenStore for ChainedTokenStore {
    fn token(&self) -> anyhow::Result<Option<String>> {
        for store in &self.stores {
            if let Some(token) = store.token()? {
                return Ok(Some(token));
            }
        }
        Ok(None)
    }

    fn describe(&self) -> String {
        self.stores.iter().map(|s| s.describe()).collect::<Vec<_>>().join(" or ")
    }
}
