//! # about-extract
//!
//! Batch extraction of company details from scraped "about" and Impressum
//! pages kept in an object store.
//!
//! Source documents (`*.md`) are listed under a prefix and fanned out to a
//! bounded pool of workers. Each worker skips documents whose record already
//! exists, downloads the text, calls the extraction service through a shared
//! rate limiter with retries, and uploads the record as `*.about.json` next
//! to its source. Outcomes are aggregated into run statistics that are
//! reported and persisted at the end.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use about_extract::{BatchOrchestrator, ChatExtractor, Config, StorageClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let storage = Arc::new(StorageClient::new(&config.storage).await?);
//!     let extractor = Arc::new(ChatExtractor::new(&config.extraction)?);
//!
//!     let orchestrator = BatchOrchestrator::from_config(&config, storage, extractor);
//!     let report = orchestrator
//!         .run_from_source(&config.storage.source_prefix, false, config.storage.limit())
//!         .await?;
//!
//!     println!("{}", report.render(10));
//!     report.persist(&config.stats_path).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]

pub mod config;
pub mod core;
pub mod monitoring;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use core::batch::{BatchConfig, BatchOrchestrator, RunReport};
pub use core::extraction::{ChatExtractor, Extractor};
pub use core::models::{CompanyInfo, ExtractionOutcome, WorkItem};
pub use core::rate_limiter::{RateLimitConfig, RateLimitStrategy, RateLimiter};
pub use monitoring::stats::{DEFAULT_REPORT_ERRORS, RunStatistics, RunSummary, StatsAggregator};
pub use storage::{LocalStorage, MemoryStorage, ObjectStorage, StorageClient};
pub use utils::error::{ExtractError, Result, RetryConfig, RetryPolicy};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Package name
pub const NAME: &str = env!("CARGO_PKG_NAME");
