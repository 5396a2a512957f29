//! Environment variable overrides
//!
//! Every variable is optional; a present but unparsable value is a
//! configuration error rather than a silent fallback.

use super::Config;
use crate::utils::error::{ExtractError, Result};
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

impl Config {
    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Applying configuration overrides from environment");

        // Storage
        if let Some(endpoint) = lookup("MINIO_ENDPOINT") {
            self.storage.endpoint = endpoint;
        }
        if let Some(access_key) = lookup("MINIO_ACCESS_KEY") {
            self.storage.access_key = access_key;
        }
        if let Some(secret_key) = lookup("MINIO_SECRET_KEY") {
            self.storage.secret_key = secret_key;
        }
        if let Some(bucket) = lookup("MINIO_BUCKET_NAME") {
            self.storage.bucket = bucket;
        }
        if let Some(secure) = lookup("MINIO_SECURE") {
            self.storage.secure = parse_bool("MINIO_SECURE", &secure)?;
        }
        if let Some(region) = lookup("MINIO_REGION") {
            self.storage.region = region;
        }
        if let Some(backend) = lookup("STORAGE_BACKEND") {
            self.storage.backend = parse_var("STORAGE_BACKEND", &backend)?;
        }
        if let Some(path) = lookup("LOCAL_STORAGE_PATH") {
            self.storage.local_path = PathBuf::from(path);
        }
        if let Some(prefix) = lookup("SOURCE_PREFIX") {
            self.storage.source_prefix = prefix;
        }
        if let Some(limit) = lookup("LIST_LIMIT") {
            self.storage.list_limit = parse_var("LIST_LIMIT", &limit)?;
        }
        if let Some(recursive) = lookup("LIST_RECURSIVE") {
            self.storage.recursive = parse_bool("LIST_RECURSIVE", &recursive)?;
        }

        // Extraction
        if let Some(base_url) = lookup("LLM_BASE_URL") {
            self.extraction.base_url = base_url;
        }
        if let Some(api_key) = lookup("LLM_API_KEY") {
            self.extraction.api_key = Some(api_key).filter(|k| !k.is_empty());
        }
        if let Some(model) = lookup("EXTRACTION_MODEL") {
            self.extraction.model = model;
        }
        if let Some(timeout) = lookup("EXTRACTION_TIMEOUT") {
            self.extraction.timeout_secs = parse_var("EXTRACTION_TIMEOUT", &timeout)?;
        }
        if let Some(workers) = lookup("EXTRACTION_MAX_WORKERS") {
            self.extraction.max_workers = parse_var("EXTRACTION_MAX_WORKERS", &workers)?;
        }
        if let Some(retries) = lookup("EXTRACTION_RETRY_COUNT") {
            self.extraction.retry_count = parse_var("EXTRACTION_RETRY_COUNT", &retries)?;
        }
        if let Some(delay) = lookup("EXTRACTION_RETRY_DELAY") {
            self.extraction.retry_delay_secs = parse_var("EXTRACTION_RETRY_DELAY", &delay)?;
        }
        if let Some(factor) = lookup("EXTRACTION_BACKOFF_FACTOR") {
            self.extraction.backoff_factor = parse_var("EXTRACTION_BACKOFF_FACTOR", &factor)?;
        }
        if let Some(jitter) = lookup("EXTRACTION_RETRY_JITTER") {
            self.extraction.retry_jitter = parse_bool("EXTRACTION_RETRY_JITTER", &jitter)?;
        }

        // Rate limiting
        if let Some(enabled) = lookup("RATE_LIMIT_ENABLED") {
            self.rate_limit.enabled = parse_bool("RATE_LIMIT_ENABLED", &enabled)?;
        }
        if let Some(rpm) = lookup("RATE_LIMIT_REQUESTS_PER_MINUTE") {
            self.rate_limit.max_requests = parse_var("RATE_LIMIT_REQUESTS_PER_MINUTE", &rpm)?;
            self.rate_limit.window_secs = 60;
        }
        if let Some(delay) = lookup("RATE_LIMIT_DELAY_BETWEEN_REQUESTS") {
            self.rate_limit.delay_between_requests_secs =
                parse_var("RATE_LIMIT_DELAY_BETWEEN_REQUESTS", &delay)?;
        }
        if let Some(strategy) = lookup("RATE_LIMIT_STRATEGY") {
            self.rate_limit.strategy = parse_var("RATE_LIMIT_STRATEGY", &strategy)?;
        }

        // Logging and output
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        if let Some(json) = lookup("LOG_JSON") {
            self.logging.json = parse_bool("LOG_JSON", &json)?;
        }
        if let Some(path) = lookup("STATS_PATH") {
            self.stats_path = PathBuf::from(path);
        }

        Ok(self)
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ExtractError::Config(format!("Invalid {}: {}", name, e)))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ExtractError::Config(format!(
            "Invalid {}: expected a boolean, got {:?}",
            name, other
        ))),
    }
}
