//! Object storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where source documents are read from and records written to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: StorageBackend,
    /// S3-compatible endpoint, `host:port` or a full URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Access key
    #[serde(default = "default_credential")]
    pub access_key: String,
    /// Secret key
    #[serde(default = "default_credential")]
    pub secret_key: String,
    /// Bucket holding both inputs and outputs
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Use https for a bare `host:port` endpoint
    #[serde(default)]
    pub secure: bool,
    /// Region sent to the S3 API
    #[serde(default = "default_region")]
    pub region: String,
    /// Root directory of the local backend
    #[serde(default = "default_local_path")]
    pub local_path: PathBuf,
    /// Key prefix of source documents
    #[serde(default = "default_source_prefix")]
    pub source_prefix: String,
    /// Maximum number of listed keys, 0 for no limit
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
    /// Descend below the prefix when listing
    #[serde(default)]
    pub recursive: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            endpoint: default_endpoint(),
            access_key: default_credential(),
            secret_key: default_credential(),
            bucket: default_bucket(),
            secure: false,
            region: default_region(),
            local_path: default_local_path(),
            source_prefix: default_source_prefix(),
            list_limit: default_list_limit(),
            recursive: false,
        }
    }
}

impl StorageConfig {
    /// Endpoint as a URL, adding the scheme implied by `secure` when missing
    pub fn endpoint_url(&self) -> String {
        if self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://") {
            self.endpoint.trim_end_matches('/').to_string()
        } else {
            let scheme = if self.secure { "https" } else { "http" };
            format!("{}://{}", scheme, self.endpoint.trim_end_matches('/'))
        }
    }

    /// Listing limit, `None` when unlimited
    pub fn limit(&self) -> Option<usize> {
        (self.list_limit > 0).then_some(self.list_limit)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.backend == StorageBackend::S3 {
            if self.bucket.trim().is_empty() {
                return Err("bucket is required for the s3 backend".to_string());
            }
            if self.endpoint.trim().is_empty() {
                return Err("endpoint is required for the s3 backend".to_string());
            }
        }
        if self.backend == StorageBackend::Local && self.local_path.as_os_str().is_empty() {
            return Err("local_path is required for the local backend".to_string());
        }
        Ok(())
    }
}

/// Storage backend kind
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-process map, for dry runs and tests
    Memory,
    /// Directory on the local filesystem
    Local,
    /// S3-compatible object store (MinIO, AWS)
    #[default]
    S3,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "local" | "fs" => Ok(StorageBackend::Local),
            "s3" | "minio" => Ok(StorageBackend::S3),
            other => Err(format!("Unknown storage backend: {}", other)),
        }
    }
}

fn default_endpoint() -> String {
    "localhost:9000".to_string()
}

fn default_credential() -> String {
    "minioadmin".to_string()
}

fn default_bucket() -> String {
    "scraped-content".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_local_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_source_prefix() -> String {
    "scraped-content/".to_string()
}

fn default_list_limit() -> usize {
    50
}
