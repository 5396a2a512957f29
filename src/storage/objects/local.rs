//! Local file system storage implementation

use super::types::{ObjectStorage, select_keys};
use crate::utils::error::{ExtractError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Object storage backed by a directory; keys are `/`-separated relative paths
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage instance, creating the root directory
    pub async fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let path = base_path.as_ref().to_path_buf();

        fs::create_dir_all(&path).await.map_err(|e| {
            ExtractError::Storage(format!("Failed to create storage directory: {}", e))
        })?;

        info!("Local object storage initialized at: {}", path.display());
        Ok(Self { base_path: path })
    }

    /// Root directory
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn object_path(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let valid = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !valid {
            return Err(ExtractError::InvalidInput(format!("Invalid object key: {}", key)));
        }
        Ok(self.base_path.join(relative))
    }

    /// Directory holding every key under `prefix`: the part up to its last `/`
    fn listing_root(&self, prefix: &str) -> Result<PathBuf> {
        match prefix.rfind('/') {
            Some(idx) => self.object_path(&prefix[..idx]),
            None => Ok(self.base_path.clone()),
        }
    }

    /// Keys of files below `start`; only its direct entries unless `recursive`
    async fn walk(&self, start: PathBuf, recursive: bool) -> std::io::Result<Vec<String>> {
        // A missing root is an error, a missing prefix directory is an empty listing
        fs::metadata(&self.base_path).await?;

        let mut keys = Vec::new();
        let mut pending = vec![start];

        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotFound && dir != self.base_path => continue,
                Err(e) => return Err(e),
            };
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    if recursive {
                        pending.push(path);
                    }
                } else if let Ok(relative) = path.strip_prefix(&self.base_path) {
                    let key = relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    keys.push(key);
                }
            }
        }

        Ok(keys)
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn list(
        &self,
        prefix: &str,
        recursive: bool,
        limit: Option<usize>,
    ) -> Result<Vec<String>> {
        let start = self
            .listing_root(prefix)
            .map_err(|e| ExtractError::Listing(e.to_string()))?;
        let keys = self.walk(start, recursive).await.map_err(|e| {
            ExtractError::Listing(format!(
                "Failed to list {}: {}",
                self.base_path.display(),
                e
            ))
        })?;
        Ok(select_keys(keys, prefix, recursive, limit))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.object_path(key)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ExtractError::Storage(format!(
                "Failed to stat {}: {}",
                key, e
            ))),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.object_path(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ExtractError::Storage(format!(
                "Failed to read {}: {}",
                key, e
            ))),
        }
    }

    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<()> {
        let path = self.object_path(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                ExtractError::StorageWrite(format!("Failed to create directory: {}", e))
            })?;
        }

        fs::write(&path, data)
            .await
            .map_err(|e| ExtractError::StorageWrite(format!("Failed to write {}: {}", key, e)))?;

        debug!("Object written: {}", path.display());
        Ok(())
    }
}
