//! Storage layer
//!
//! Object storage for source documents and extracted records.

/// Object storage module
pub mod objects;

pub use objects::{LocalStorage, MemoryStorage, ObjectStorage, StorageClient};
#[cfg(feature = "s3")]
pub use objects::S3Storage;
