//! Per-item pipeline: skip check, download, extract, upload

use super::types::BatchConfig;
use crate::core::extraction::Extractor;
use crate::core::models::{ExtractionOutcome, JSON_CONTENT_TYPE, WorkItem};
use crate::core::rate_limiter::RateLimiter;
use crate::monitoring::stats::StatsAggregator;
use crate::storage::ObjectStorage;
use crate::utils::error::RetryPolicy;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Everything a worker needs, shared by all workers of a run
pub(super) struct WorkerContext {
    pub storage: Arc<dyn ObjectStorage>,
    pub extractor: Arc<dyn Extractor>,
    pub limiter: Arc<RateLimiter>,
    pub retry: RetryPolicy,
    pub stats: Arc<StatsAggregator>,
    pub config: BatchConfig,
}

impl WorkerContext {
    /// Run one item to its terminal outcome
    pub(super) async fn process(&self, item: &WorkItem) -> ExtractionOutcome {
        let key = item.key();
        let output_key = self.config.output_key_for(key);

        match self.storage.exists(&output_key).await {
            Ok(true) => {
                return ExtractionOutcome::Skipped {
                    reason: format!("{} already exists", output_key),
                };
            }
            Ok(false) => {}
            Err(e) => {
                return ExtractionOutcome::Failed {
                    error: format!("Existence check failed: {}", e),
                    elapsed: Duration::ZERO,
                };
            }
        }

        let start = Instant::now();
        let failed = |error: String| ExtractionOutcome::Failed {
            error,
            elapsed: start.elapsed(),
        };

        let text = match self.storage.get(key).await {
            Ok(Some(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
            Ok(None) => return failed("No content".to_string()),
            Err(e) => return failed(format!("Download failed: {}", e)),
        };
        if text.trim().is_empty() {
            return failed("No content".to_string());
        }

        // Every attempt, retries included, passes the shared limiter
        let limiter = self.limiter.as_ref();
        let extractor = self.extractor.as_ref();
        let text = text.as_str();
        let result = self
            .retry
            .call(move || async move {
                let grant = limiter.acquire().await;
                if !grant.waited.is_zero() {
                    debug!("Waited {:?} for rate limit: {}", grant.waited, key);
                }
                extractor.extract(text).await
            })
            .await;

        let record = match result {
            Ok(Some(record)) => record,
            Ok(None) => return failed("Extraction returned no result".to_string()),
            Err(e) => return failed(format!("Extraction failed: {}", e)),
        };
        let elapsed = start.elapsed();

        let payload = match record.to_json_bytes() {
            Ok(payload) => payload,
            Err(e) => return failed(format!("Serialization failed: {}", e)),
        };
        if let Err(e) = self
            .storage
            .put(&output_key, payload, JSON_CONTENT_TYPE)
            .await
        {
            return failed(format!("Upload failed: {}", e));
        }

        ExtractionOutcome::Success { record, elapsed }
    }

    /// Feed an outcome into the run statistics
    pub(super) fn record(&self, item: &WorkItem, outcome: &ExtractionOutcome) {
        match outcome {
            ExtractionOutcome::Success { elapsed, .. } => self.stats.record_success(*elapsed),
            ExtractionOutcome::Skipped { .. } => self.stats.record_skip(),
            ExtractionOutcome::Failed { error, .. } => self.stats.record_error(item.key(), error),
        }
    }
}
