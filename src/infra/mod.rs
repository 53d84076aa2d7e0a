//! Infrastructure - configuration
//!
//! This module contains infrastructure concerns:
//! - `config` - Application configuration (TOML loading, defaults)
//! - `logging` - tracing subscriber setup (text or JSON)

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use config::{ApiEnvironment, Config, LogFormat};
pub use logging::init_tracing;
