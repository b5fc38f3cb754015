//! Configuration module for Build Advisor
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`ADVISOR_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use build_advisor::config::AdvisorConfig;
//!
//! let config = AdvisorConfig::default();
//! assert_eq!(config.server.port, 8000);
//! assert_eq!(config.catalog.shortlist_limit, 10);
//!
//! let toml = r#"
//! [llm]
//! model = "llama-3.3-70b-versatile"
//! "#;
//! let config: AdvisorConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
//! assert_eq!(config.llm.api_key_env, "GROQ_KEY");
//! ```

pub mod catalog;
pub mod error;
pub mod llm;
pub mod logging;
pub mod server;

pub use catalog::CatalogConfig;
pub use error::ConfigError;
pub use llm::{LlmConfig, ResponseFormatMode};
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "advisor.toml";

/// Unified configuration for the advisor service and CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdvisorConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Catalog location and shortlist size
    pub catalog: CatalogConfig,
    /// Structured-output provider
    pub llm: LlmConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AdvisorConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (the previous value is kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("ADVISOR_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("ADVISOR_HOST") {
            self.server.host = host;
        }

        if let Ok(dir) = std::env::var("ADVISOR_CATALOG_DIR") {
            self.catalog.dir = PathBuf::from(dir);
        }
        if let Ok(limit) = std::env::var("ADVISOR_SHORTLIST_LIMIT") {
            if let Ok(l) = limit.parse() {
                self.catalog.shortlist_limit = l;
            }
        }

        if let Ok(model) = std::env::var("ADVISOR_MODEL") {
            self.llm.model = model;
        }
        if let Ok(url) = std::env::var("ADVISOR_LLM_BASE_URL") {
            self.llm.base_url = url;
        }

        if let Ok(level) = std::env::var("ADVISOR_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ADVISOR_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::validation("server.port", "port must be non-zero"));
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout_seconds",
                "timeout must be positive",
            ));
        }
        if self.catalog.shortlist_limit == 0 {
            return Err(ConfigError::validation(
                "catalog.shortlist_limit",
                "limit must be at least 1",
            ));
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(ConfigError::validation("llm.base_url", "URL cannot be empty"));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::validation("llm.model", "model cannot be empty"));
        }
        if self.llm.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "llm.timeout_seconds",
                "timeout must be positive",
            ));
        }
        if self.server.request_timeout_seconds <= self.llm.timeout_seconds {
            return Err(ConfigError::validation(
                "server.request_timeout_seconds",
                &format!(
                    "must be greater than llm.timeout_seconds ({}) so one provider call fits in a request",
                    self.llm.timeout_seconds
                ),
            ));
        }
        if !self.llm.temperature.is_finite() || self.llm.temperature < 0.0 {
            return Err(ConfigError::validation(
                "llm.temperature",
                "temperature must be a non-negative number",
            ));
        }
        Ok(())
    }
}
