//! Error handling for the extraction pipeline
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for the pipeline
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Main error type for the pipeline
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network errors talking to the extraction service or the object store
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Rate limiting reported by the extraction service
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Non-retryable provider rejection (auth, bad request, ...)
    #[error("Provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// Extraction produced nothing usable
    #[error("No data extracted: {0}")]
    NoResult(String),

    /// Read-side object store failure (list excluded)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Upload of the structured result failed
    #[error("Upload failed: {0}")]
    StorageWrite(String),

    /// Enumerating the work items failed; aborts the run
    #[error("Listing failed: {0}")]
    Listing(String),

    /// Invalid arguments (programming errors)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Whether a retry has a chance of succeeding
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ExtractError::Network(_)
                | ExtractError::Timeout(_)
                | ExtractError::RateLimit(_)
                | ExtractError::Storage(_)
        )
    }

    /// Short machine-friendly error code, used in logs
    pub fn code(&self) -> &'static str {
        match self {
            ExtractError::Config(_) => "config_error",
            ExtractError::Network(_) => "network_error",
            ExtractError::Timeout(_) => "timeout_error",
            ExtractError::RateLimit(_) => "rate_limit_error",
            ExtractError::Provider { .. } => "provider_error",
            ExtractError::NoResult(_) => "no_result",
            ExtractError::Storage(_) => "storage_error",
            ExtractError::StorageWrite(_) => "storage_write_error",
            ExtractError::Listing(_) => "listing_error",
            ExtractError::InvalidInput(_) => "invalid_input",
            ExtractError::Serialization(_) => "serialization_error",
            ExtractError::Yaml(_) => "yaml_error",
            ExtractError::Io(_) => "io_error",
        }
    }

    /// Map an HTTP status from the extraction service onto the taxonomy
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            429 => ExtractError::RateLimit(body.to_string()),
            408 => ExtractError::Timeout(body.to_string()),
            500..=599 => ExtractError::Network(format!("Server error {}: {}", status, body)),
            _ => ExtractError::Provider {
                status,
                message: body.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for ExtractError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExtractError::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            ExtractError::from_status(status.as_u16(), &err.to_string())
        } else if err.is_decode() {
            ExtractError::NoResult(format!("Undecodable response: {}", err))
        } else {
            ExtractError::Network(err.to_string())
        }
    }
}
