//! Extraction service configuration

use crate::utils::error::RetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the LLM-backed extraction service and its retry policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token, if the service needs one
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Number of concurrent workers
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    /// Retries after the first attempt
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    /// Delay before the first retry, in seconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: f64,
    /// Multiplier applied to the delay after every retry
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: f64,
    /// Upper bound for a single retry delay, in seconds
    #[serde(default = "default_max_retry_delay")]
    pub max_retry_delay_secs: f64,
    /// Spread retry delays by up to 10% either way
    #[serde(default)]
    pub retry_jitter: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout(),
            max_workers: default_max_workers(),
            retry_count: default_retry_count(),
            retry_delay_secs: default_retry_delay(),
            backoff_factor: default_backoff_factor(),
            max_retry_delay_secs: default_max_retry_delay(),
            retry_jitter: false,
        }
    }
}

impl ExtractionConfig {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry policy settings derived from this config
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new(
            self.retry_count,
            Duration::from_secs_f64(self.retry_delay_secs.max(0.0)),
        )
        .with_backoff_factor(self.backoff_factor)
        .with_max_delay(Duration::from_secs_f64(self.max_retry_delay_secs.max(0.0)))
        .with_jitter(self.retry_jitter)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_workers == 0 {
            return Err("max_workers must be greater than 0".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if !self.backoff_factor.is_finite() || self.backoff_factor < 1.0 {
            return Err("backoff_factor must be at least 1.0".to_string());
        }
        if !self.retry_delay_secs.is_finite() || self.retry_delay_secs < 0.0 {
            return Err("retry_delay_secs must be a non-negative number".to_string());
        }
        if !self.max_retry_delay_secs.is_finite() || self.max_retry_delay_secs < 0.0 {
            return Err("max_retry_delay_secs must be a non-negative number".to_string());
        }
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_workers() -> usize {
    5
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_delay() -> f64 {
    2.0
}

fn default_backoff_factor() -> f64 {
    2.0
}

fn default_max_retry_delay() -> f64 {
    60.0
}
