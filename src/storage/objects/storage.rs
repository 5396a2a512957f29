//! StorageClient construction and dispatch

use super::types::{ObjectStorage, StorageClient};
use super::{LocalStorage, MemoryStorage};
use crate::config::{StorageBackend, StorageConfig};
use crate::utils::error::Result;
use async_trait::async_trait;
use tracing::info;

impl StorageClient {
    /// Create the backend selected in the configuration
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing object storage: {:?}", config.backend);

        match config.backend {
            StorageBackend::Memory => Ok(StorageClient::Memory(MemoryStorage::new())),
            StorageBackend::Local => Ok(StorageClient::Local(
                LocalStorage::new(&config.local_path).await?,
            )),
            #[cfg(feature = "s3")]
            StorageBackend::S3 => Ok(StorageClient::S3(super::S3Storage::new(config).await?)),
            #[cfg(not(feature = "s3"))]
            StorageBackend::S3 => Err(crate::utils::error::ExtractError::Config(
                "S3 feature not enabled".to_string(),
            )),
        }
    }

    /// Backend kind
    pub fn backend(&self) -> StorageBackend {
        match self {
            StorageClient::Memory(_) => StorageBackend::Memory,
            StorageClient::Local(_) => StorageBackend::Local,
            #[cfg(feature = "s3")]
            StorageClient::S3(_) => StorageBackend::S3,
        }
    }
}

#[async_trait]
impl ObjectStorage for StorageClient {
    async fn list(
        &self,
        prefix: &str,
        recursive: bool,
        limit: Option<usize>,
    ) -> Result<Vec<String>> {
        match self {
            StorageClient::Memory(storage) => storage.list(prefix, recursive, limit).await,
            StorageClient::Local(storage) => storage.list(prefix, recursive, limit).await,
            #[cfg(feature = "s3")]
            StorageClient::S3(storage) => storage.list(prefix, recursive, limit).await,
        }
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        match self {
            StorageClient::Memory(storage) => storage.exists(key).await,
            StorageClient::Local(storage) => storage.exists(key).await,
            #[cfg(feature = "s3")]
            StorageClient::S3(storage) => storage.exists(key).await,
        }
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self {
            StorageClient::Memory(storage) => storage.get(key).await,
            StorageClient::Local(storage) => storage.get(key).await,
            #[cfg(feature = "s3")]
            StorageClient::S3(storage) => storage.get(key).await,
        }
    }

    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()> {
        match self {
            StorageClient::Memory(storage) => storage.put(key, data, content_type).await,
            StorageClient::Local(storage) => storage.put(key, data, content_type).await,
            #[cfg(feature = "s3")]
            StorageClient::S3(storage) => storage.put(key, data, content_type).await,
        }
    }
}
