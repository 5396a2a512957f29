//! Configuration management
//!
//! Settings are layered: YAML file, then environment (with `.env` support),
//! then command-line flags applied by the binary.

pub mod loader;
pub mod models;

pub use models::*;

use crate::utils::error::{ExtractError, Result, RetryConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Object storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Extraction service and worker settings
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Rate limiting of extraction calls
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Where the run summary is persisted
    #[serde(default = "default_stats_path")]
    pub stats_path: PathBuf,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ExtractError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| ExtractError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from defaults plus environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Full layered load: optional file, `.env`, then process environment
    ///
    /// Not validated: callers apply their own overrides, then call `validate`.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(ExtractError::Config(format!("Failed to load .env: {}", e)));
            }
        }

        let base = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };

        base.with_env_overrides()
    }

    /// Retry settings for extraction calls
    pub fn retry_config(&self) -> RetryConfig {
        self.extraction.retry_config()
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.storage
            .validate()
            .map_err(|e| ExtractError::Config(format!("Storage config error: {}", e)))?;

        self.extraction
            .validate()
            .map_err(|e| ExtractError::Config(format!("Extraction config error: {}", e)))?;

        self.rate_limit
            .validate()
            .map_err(|e| ExtractError::Config(format!("Rate limit config error: {}", e)))?;

        if self.stats_path.as_os_str().is_empty() {
            return Err(ExtractError::Config("stats_path must not be empty".to_string()));
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ExtractError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn default_stats_path() -> PathBuf {
    PathBuf::from("logs/extraction_stats.json")
}
