//! Batch processing of source documents
//!
//! Items fan out to a fixed pool of workers. Each worker takes one item
//! through skip check, download, rate-limited extraction with retries and
//! upload, then records the outcome.

mod orchestrator;
mod types;
mod worker;


pub use orchestrator::BatchOrchestrator;
pub use types::{BatchConfig, RunReport};
