//! Error handling utilities
//!
//! This module provides the pipeline error taxonomy and the retry machinery built on it.

pub mod error;
pub mod recovery;

// Re-export commonly used types
pub use error::*;
pub use recovery::*;
