//! Batch orchestrator

use super::types::{BatchConfig, RunReport};
use super::worker::WorkerContext;
use crate::config::Config;
use crate::core::extraction::Extractor;
use crate::core::models::{ExtractionOutcome, WorkItem};
use crate::core::rate_limiter::RateLimiter;
use crate::monitoring::stats::StatsAggregator;
use crate::storage::ObjectStorage;
use crate::utils::error::{ExtractError, Result, RetryPolicy};
use futures::future;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{error, info, warn};

/// Runs work items through a bounded pool of workers
///
/// The limiter, retry policy, storage and extractor are shared by every
/// worker. Each run records into a fresh `StatsAggregator`.
pub struct BatchOrchestrator {
    storage: Arc<dyn ObjectStorage>,
    extractor: Arc<dyn Extractor>,
    limiter: Arc<RateLimiter>,
    retry: RetryPolicy,
    config: BatchConfig,
}

impl BatchOrchestrator {
    /// Create a new orchestrator
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        extractor: Arc<dyn Extractor>,
        limiter: Arc<RateLimiter>,
        retry: RetryPolicy,
        config: BatchConfig,
    ) -> Self {
        let config = BatchConfig {
            max_workers: config.max_workers.max(1),
            ..config
        };
        Self {
            storage,
            extractor,
            limiter,
            retry,
            config,
        }
    }

    /// Create an orchestrator with limiter, retry and worker settings from `config`
    pub fn from_config(
        config: &Config,
        storage: Arc<dyn ObjectStorage>,
        extractor: Arc<dyn Extractor>,
    ) -> Self {
        Self::new(
            storage,
            extractor,
            Arc::new(RateLimiter::new(config.rate_limit.clone())),
            RetryPolicy::new(config.retry_config()),
            BatchConfig::new().with_max_workers(config.extraction.max_workers),
        )
    }

    /// Current configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Shared rate limiter
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// List source documents and process them
    ///
    /// A listing failure aborts the run before any item is dispatched.
    pub async fn run_from_source(
        &self,
        prefix: &str,
        recursive: bool,
        limit: Option<usize>,
    ) -> Result<RunReport> {
        self.run_from_source_until(prefix, recursive, limit, future::pending::<()>())
            .await
    }

    /// `run_from_source` that stops dispatching once `shutdown` resolves
    pub async fn run_from_source_until<S>(
        &self,
        prefix: &str,
        recursive: bool,
        limit: Option<usize>,
        shutdown: S,
    ) -> Result<RunReport>
    where
        S: Future<Output = ()> + Send,
    {
        let items = self.list_sources(prefix, recursive, limit).await?;
        Ok(self.run_until(items, shutdown).await)
    }

    /// Source documents under `prefix`, filtered by the source suffix
    pub async fn list_sources(
        &self,
        prefix: &str,
        recursive: bool,
        limit: Option<usize>,
    ) -> Result<Vec<WorkItem>> {
        info!("Listing objects under {}", prefix);

        let keys = self
            .storage
            .list(prefix, recursive, limit)
            .await
            .map_err(|e| match e {
                ExtractError::Listing(msg) => ExtractError::Listing(msg),
                other => ExtractError::Listing(other.to_string()),
            })?;

        let items: Vec<WorkItem> = keys
            .into_iter()
            .filter(|key| self.config.is_source_key(key))
            .map(WorkItem::from)
            .collect();

        info!("Found {} source files", items.len());
        Ok(items)
    }

    /// Process every item and wait for all of them
    pub async fn run(&self, items: Vec<WorkItem>) -> RunReport {
        self.run_until(items, future::pending::<()>()).await
    }

    /// Process items until done or until `shutdown` resolves
    ///
    /// After shutdown no new item is started; items already running finish
    /// and are recorded.
    pub async fn run_until<S>(&self, items: Vec<WorkItem>, shutdown: S) -> RunReport
    where
        S: Future<Output = ()> + Send,
    {
        let total = items.len();
        let stats = Arc::new(StatsAggregator::new());
        let context = Arc::new(WorkerContext {
            storage: self.storage.clone(),
            extractor: self.extractor.clone(),
            limiter: self.limiter.clone(),
            retry: self.retry.clone(),
            stats: stats.clone(),
            config: self.config.clone(),
        });

        info!(
            "Processing {} items with {} workers",
            total, self.config.max_workers
        );

        let dispatched = AtomicUsize::new(0);
        let completed = AtomicUsize::new(0);

        stream::iter(items)
            .take_until(shutdown)
            .map(|item| {
                dispatched.fetch_add(1, Ordering::Relaxed);
                let context = context.clone();
                let completed = &completed;

                async move {
                    let worker_context = context.clone();
                    let worker_item = item.clone();
                    let outcome = match tokio::spawn(async move {
                        worker_context.process(&worker_item).await
                    })
                    .await
                    {
                        Ok(outcome) => outcome,
                        Err(join_error) => ExtractionOutcome::Failed {
                            error: format!("Worker failed: {}", join_error),
                            elapsed: Duration::ZERO,
                        },
                    };

                    context.record(&item, &outcome);
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    log_progress(done, total, &item, &outcome);
                }
            })
            .buffer_unordered(self.config.max_workers)
            .collect::<Vec<()>>()
            .await;

        let dispatched = dispatched.load(Ordering::Relaxed);
        let not_dispatched = total - dispatched;
        if not_dispatched > 0 {
            warn!(
                "Shutdown requested: {} of {} items were not started",
                not_dispatched, total
            );
        }

        let report = RunReport::new(stats, dispatched, not_dispatched);
        info!(
            "Run finished: {} successful, {} skipped, {} failed",
            report.summary.successful, report.summary.skipped, report.summary.errors
        );
        report
    }
}

fn log_progress(done: usize, total: usize, item: &WorkItem, outcome: &ExtractionOutcome) {
    match outcome {
        ExtractionOutcome::Success { elapsed, .. } => info!(
            "[{}/{}] {} {} ({:.2}s)",
            done,
            total,
            outcome.label(),
            item,
            elapsed.as_secs_f64()
        ),
        ExtractionOutcome::Skipped { reason } => {
            info!("[{}/{}] {} {}: {}", done, total, outcome.label(), item, reason)
        }
        ExtractionOutcome::Failed { error, .. } => {
            error!("[{}/{}] {} {}: {}", done, total, outcome.label(), item, error)
        }
    }
}
