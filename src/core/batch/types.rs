//! Batch configuration and run report

use crate::monitoring::stats::{RunStatistics, RunSummary, StatsAggregator, StatsReport};
use crate::utils::error::Result;
use std::path::Path;
use std::sync::Arc;

/// Configuration for a batch run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum concurrent workers (default: 5)
    pub max_workers: usize,
    /// Suffix of source documents (default: ".md")
    pub source_suffix: String,
    /// Suffix of extracted records (default: ".about.json")
    pub output_suffix: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_workers: 5,
            source_suffix: ".md".to_string(),
            output_suffix: ".about.json".to_string(),
        }
    }
}

impl BatchConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker count
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    /// Set source and output suffixes
    pub fn with_suffixes(
        mut self,
        source_suffix: impl Into<String>,
        output_suffix: impl Into<String>,
    ) -> Self {
        self.source_suffix = source_suffix.into();
        self.output_suffix = output_suffix.into();
        self
    }

    /// Whether a listed key is a source document
    pub fn is_source_key(&self, key: &str) -> bool {
        key.ends_with(&self.source_suffix)
    }

    /// Key the record for `key` is written to
    ///
    /// `a/b.md` becomes `a/b.about.json`; keys without the source suffix get
    /// the output suffix appended.
    pub fn output_key_for(&self, key: &str) -> String {
        let stem = if self.source_suffix.is_empty() {
            key
        } else {
            key.strip_suffix(&self.source_suffix).unwrap_or(key)
        };
        format!("{}{}", stem, self.output_suffix)
    }
}

/// Result of a batch run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Summary at completion
    pub summary: RunSummary,
    /// Raw counters, error records and durations at completion
    pub statistics: RunStatistics,
    /// Items handed to a worker
    pub dispatched: usize,
    /// Items never started because of shutdown
    pub not_dispatched: usize,
    stats: Arc<StatsAggregator>,
}

impl RunReport {
    pub(super) fn new(stats: Arc<StatsAggregator>, dispatched: usize, not_dispatched: usize) -> Self {
        stats.finish();
        Self {
            summary: stats.summary(),
            statistics: stats.snapshot(),
            dispatched,
            not_dispatched,
            stats,
        }
    }

    /// Whether every listed item was dispatched
    pub fn is_complete(&self) -> bool {
        self.not_dispatched == 0
    }

    /// Aggregator the run recorded into
    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    /// Human-readable report with at most `max_errors` error details
    pub fn render(&self, max_errors: usize) -> StatsReport {
        self.stats.render_report(max_errors)
    }

    /// Persist summary and error details as JSON
    pub async fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        self.stats.persist(path).await
    }
}
