//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml
//!
//! Every section is optional; missing values fall back to the defaults below.

use crate::domain::scope::{ClockTime, TimeScope, TimeWindow};
use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

pub const HOST_DEV: &str = "http://localhost:3000";
pub const HOST_PROD: &str = "https://dioparkapp-production.up.railway.app";
pub const DEFAULT_STATS_PATH: &str = "/api/statistic/transaksi";
pub const DEFAULT_CONFIG_PATH: &str = "config/dev.toml";

/// Which statistics backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiEnvironment {
    Development,
    Production,
}

impl ApiEnvironment {
    pub fn default_host(&self) -> &'static str {
        match self {
            ApiEnvironment::Development => HOST_DEV,
            ApiEnvironment::Production => HOST_PROD,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_environment")]
    pub environment: ApiEnvironment,
    /// Overrides the environment's host when set
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_stats_path")]
    pub stats_path: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            host: None,
            stats_path: default_stats_path(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_environment() -> ApiEnvironment {
    ApiEnvironment::Development
}

fn default_stats_path() -> String {
    DEFAULT_STATS_PATH.to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,
    /// File holding a cookie string (`a=b; token=...`), checked before the env var
    #[serde(default)]
    pub cookie_file: Option<String>,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
            cookie_file: None,
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_token_env() -> String {
    "PARKIR_TOKEN".to_string()
}

fn default_cookie_name() -> String {
    "token".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_scope")]
    pub scope: TimeScope,
    #[serde(default = "default_start_time")]
    pub start_time: ClockTime,
    #[serde(default = "default_end_time")]
    pub end_time: ClockTime,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            scope: default_scope(),
            start_time: default_start_time(),
            end_time: default_end_time(),
        }
    }
}

fn default_scope() -> TimeScope {
    TimeScope::Today
}

fn default_start_time() -> ClockTime {
    TimeWindow::default().start
}

fn default_end_time() -> ClockTime {
    TimeWindow::default().end
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct EgressConfig {
    /// JSONL file receiving one snapshot per run (disabled when unset)
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MockApiConfig {
    #[serde(default = "default_mock_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_mock_port")]
    pub port: u16,
    #[serde(default = "default_mock_token")]
    pub token: String,
    /// JSON feed to serve instead of the bundled dummy dataset
    #[serde(default)]
    pub dataset: Option<String>,
}

impl Default for MockApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_mock_bind_address(),
            port: default_mock_port(),
            token: default_mock_token(),
            dataset: None,
        }
    }
}

fn default_mock_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_mock_port() -> u16 {
    3000
}

fn default_mock_token() -> String {
    "dev-token".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_log_format() -> LogFormat {
    LogFormat::Text
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub egress: EgressConfig,
    #[serde(default)]
    pub mock_api: MockApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    api_environment: ApiEnvironment,
    api_host: String,
    stats_path: String,
    api_timeout_ms: u64,
    token_env: String,
    cookie_file: Option<String>,
    cookie_name: String,
    scope: TimeScope,
    window: TimeWindow,
    egress_file: Option<String>,
    mock_bind_address: String,
    mock_port: u16,
    mock_token: String,
    mock_dataset: Option<String>,
    log_format: LogFormat,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), "default".to_string())
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: String) -> Self {
        let api_host = toml_config
            .api
            .host
            .unwrap_or_else(|| toml_config.api.environment.default_host().to_string());

        Self {
            api_environment: toml_config.api.environment,
            api_host: api_host.trim_end_matches('/').to_string(),
            stats_path: toml_config.api.stats_path,
            api_timeout_ms: toml_config.api.timeout_ms,
            token_env: toml_config.auth.token_env,
            cookie_file: toml_config.auth.cookie_file,
            cookie_name: toml_config.auth.cookie_name,
            scope: toml_config.dashboard.scope,
            window: TimeWindow::new(
                toml_config.dashboard.start_time,
                toml_config.dashboard.end_time,
            ),
            egress_file: toml_config.egress.file,
            mock_bind_address: toml_config.mock_api.bind_address,
            mock_port: toml_config.mock_api.port,
            mock_token: toml_config.mock_api.token,
            mock_dataset: toml_config.mock_api.dataset,
            log_format: toml_config.logging.format,
            config_file,
        }
    }

    /// Config file path: the `--config` value, then `CONFIG_FILE`, then `config/dev.toml`
    pub fn resolve_config_path(cli_path: Option<&str>) -> String {
        if let Some(path) = cli_path {
            return path.to_string();
        }

        // Check CONFIG_FILE environment variable
        if let Ok(path) = env::var("CONFIG_FILE") {
            return path;
        }

        DEFAULT_CONFIG_PATH.to_string()
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self::from_toml(toml_config, path.display().to_string()))
    }

    /// Load from `path`, falling back to defaults when it is missing or invalid.
    ///
    /// The load error is handed back so it can be logged once tracing is up.
    pub fn load_from_path(path: &str) -> (Self, Option<anyhow::Error>) {
        match Self::from_file(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Resolve the config path and load it
    pub fn load(cli_path: Option<&str>) -> (Self, Option<anyhow::Error>) {
        Self::load_from_path(&Self::resolve_config_path(cli_path))
    }

    /// Full statistics endpoint URL
    pub fn stats_url(&self) -> String {
        format!("{}{}", self.api_host, self.stats_path)
    }

    pub fn api_environment(&self) -> ApiEnvironment {
        self.api_environment
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    pub fn stats_path(&self) -> &str {
        &self.stats_path
    }

    pub fn api_timeout_ms(&self) -> u64 {
        self.api_timeout_ms
    }

    pub fn token_env(&self) -> &str {
        &self.token_env
    }

    pub fn cookie_file(&self) -> Option<&str> {
        self.cookie_file.as_deref()
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn scope(&self) -> TimeScope {
        self.scope
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn egress_file(&self) -> Option<&str> {
        self.egress_file.as_deref()
    }

    pub fn mock_bind_address(&self) -> &str {
        &self.mock_bind_address
    }

    pub fn mock_port(&self) -> u16 {
        self.mock_port
    }

    pub fn mock_token(&self) -> &str {
        &self.mock_token
    }

    pub fn mock_dataset(&self) -> Option<&str> {
        self.mock_dataset.as_deref()
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method to point the client at another host (tests, CLI override)
    pub fn with_api_host(mut self, host: &str) -> Self {
        self.api_host = host.trim_end_matches('/').to_string();
        self
    }
}
