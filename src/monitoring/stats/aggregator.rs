//! Statistics aggregator shared by all workers of a run

use super::report::StatsReport;
use super::types::{ErrorRecord, PersistedStats, RunStatistics, RunSummary};
use crate::utils::error::Result;
use parking_lot::Mutex;
use std::path::Path;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// Default number of error details shown in the rendered report
pub const DEFAULT_REPORT_ERRORS: usize = 10;

/// Thread-safe counters and timing samples for one run
#[derive(Debug)]
pub struct StatsAggregator {
    /// All counters under a single lock so summaries never see torn state
    storage: Mutex<RunStatistics>,
    /// Aggregator creation time
    start_time: Instant,
    /// Set once the run has completed
    end_time: Mutex<Option<Instant>>,
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsAggregator {
    /// Create an empty aggregator; the run clock starts now
    pub fn new() -> Self {
        Self {
            storage: Mutex::new(RunStatistics::default()),
            start_time: Instant::now(),
            end_time: Mutex::new(None),
        }
    }

    /// Record a successful extraction
    pub fn record_success(&self, duration: Duration) {
        let mut storage = self.storage.lock();
        storage.successful += 1;
        storage.total += 1;
        storage.durations.push(duration);
    }

    /// Record a skipped item
    pub fn record_skip(&self) {
        let mut storage = self.storage.lock();
        storage.skipped += 1;
        storage.total += 1;
    }

    /// Record a failed item
    pub fn record_error(&self, key: &str, message: impl Into<String>) {
        let record = ErrorRecord {
            key: key.to_string(),
            message: message.into(),
            timestamp: chrono::Utc::now(),
        };

        let mut storage = self.storage.lock();
        storage.failed += 1;
        storage.total += 1;
        storage.errors.push(record);
    }

    /// Consistent copy of the raw statistics
    pub fn snapshot(&self) -> RunStatistics {
        self.storage.lock().clone()
    }

    /// Stop the run clock; later calls keep the first end time
    pub fn finish(&self) {
        let mut end_time = self.end_time.lock();
        if end_time.is_none() {
            *end_time = Some(Instant::now());
        }
    }

    /// Wall-clock time since the aggregator was created, up to `finish`
    pub fn elapsed(&self) -> Duration {
        match *self.end_time.lock() {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Summary computed from the current counters
    pub fn summary(&self) -> RunSummary {
        let elapsed = self.elapsed();
        let storage = self.storage.lock();
        Self::summarize(&storage, elapsed)
    }

    /// Summary plus the first `max_errors` error details, ready for display
    pub fn render_report(&self, max_errors: usize) -> StatsReport {
        let elapsed = self.elapsed();
        let storage = self.storage.lock();
        StatsReport::new(
            Self::summarize(&storage, elapsed),
            storage.errors.clone(),
            max_errors,
        )
    }

    /// Write summary and full error list as JSON to `path`
    ///
    /// Safe to call mid-run: the lock is released before any I/O.
    pub async fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let document = {
            let elapsed = self.elapsed();
            let storage = self.storage.lock();
            PersistedStats {
                summary: Self::summarize(&storage, elapsed),
                error_details: storage.errors.clone(),
                timestamp: chrono::Utc::now(),
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(&document)?;
        tokio::fs::write(path, json).await?;

        info!("Statistics saved to: {}", path.display());
        debug!(
            "Persisted {} error records for {} items",
            document.error_details.len(),
            document.summary.total_files
        );
        Ok(())
    }

    fn summarize(storage: &RunStatistics, elapsed: Duration) -> RunSummary {
        let success_rate = if storage.total > 0 {
            storage.successful as f64 / storage.total as f64
        } else {
            0.0
        };

        let average_processing_secs = if storage.durations.is_empty() {
            0.0
        } else {
            storage.durations.iter().map(Duration::as_secs_f64).sum::<f64>()
                / storage.durations.len() as f64
        };

        let elapsed_secs = elapsed.as_secs_f64();
        let files_per_second = if elapsed_secs > 0.0 {
            storage.total as f64 / elapsed_secs
        } else {
            0.0
        };

        RunSummary {
            total_files: storage.total,
            successful: storage.successful,
            skipped: storage.skipped,
            errors: storage.failed,
            success_rate,
            elapsed_secs,
            average_processing_secs,
            files_per_second,
        }
    }
}
