//! Common test utilities for about-extract
//!
//! All helpers create real objects; storage is in-memory or a temp directory.

pub mod assertions;
pub mod extractors;
pub mod fixtures;

pub use extractors::ScriptedExtractor;
pub use fixtures::PageFixtures;
