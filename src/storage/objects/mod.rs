//! Object storage
//!
//! Source documents are listed and read from, and extracted records written
//! to, one bucket-like key space. Backends: in-memory, local directory and
//! S3-compatible stores.

mod local;
mod memory;
#[cfg(feature = "s3")]
mod s3;
mod storage;
mod types;


pub use local::LocalStorage;
pub use memory::MemoryStorage;
#[cfg(feature = "s3")]
pub use s3::S3Storage;
pub use types::{ObjectStorage, StorageClient};

#[cfg(test)]
pub use types::MockObjectStorage;
