//! Object storage trait and backend enum

use super::{LocalStorage, MemoryStorage};
#[cfg(feature = "s3")]
use super::S3Storage;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Operations the batch pipeline needs from an object store
///
/// Read-side failures map to `ExtractError::Storage`, listing failures to
/// `ExtractError::Listing` and upload failures to `ExtractError::StorageWrite`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Keys under `prefix` in lexicographic order
    ///
    /// Non-recursive listing returns only keys with no `/` after the prefix.
    async fn list(
        &self,
        prefix: &str,
        recursive: bool,
        limit: Option<usize>,
    ) -> Result<Vec<String>>;

    /// Whether an object exists at `key`
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Object content, `None` when the key is absent
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Create or replace the object at `key`
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()>;
}

/// Configured storage backend
#[derive(Debug, Clone)]
pub enum StorageClient {
    /// In-process map
    Memory(MemoryStorage),
    /// Local directory tree
    Local(LocalStorage),
    /// S3-compatible object store
    #[cfg(feature = "s3")]
    S3(S3Storage),
}

/// Keys matching a listing request, sorted and truncated
pub(super) fn select_keys<I>(
    keys: I,
    prefix: &str,
    recursive: bool,
    limit: Option<usize>,
) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut selected: Vec<String> = keys
        .into_iter()
        .filter(|key| match key.strip_prefix(prefix) {
            Some(rest) => recursive || !rest.contains('/'),
            None => false,
        })
        .collect();
    selected.sort();
    if let Some(limit) = limit {
        selected.truncate(limit);
    }
    selected
}
