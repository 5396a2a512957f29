//! Types for run statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One failed work item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Object key of the failed item
    #[serde(rename = "file")]
    pub key: String,
    /// Error message
    #[serde(rename = "error")]
    pub message: String,
    /// When the error was recorded
    pub timestamp: DateTime<Utc>,
}

/// Aggregate state of a run, all counters behind one lock
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStatistics {
    /// Items with a terminal outcome
    pub total: u64,
    /// Items extracted and uploaded
    pub successful: u64,
    /// Items whose output already existed
    pub skipped: u64,
    /// Items that failed at any step
    pub failed: u64,
    /// Error records in recording order
    pub errors: Vec<ErrorRecord>,
    /// Extraction latencies of successful items, in recording order
    pub durations: Vec<Duration>,
}

impl RunStatistics {
    /// `successful + skipped + failed == total`
    pub fn is_consistent(&self) -> bool {
        self.successful + self.skipped + self.failed == self.total
    }
}

/// Derived figures, computed on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Items with a terminal outcome
    pub total_files: u64,
    /// Successful items
    pub successful: u64,
    /// Skipped items
    pub skipped: u64,
    /// Failed items
    pub errors: u64,
    /// `successful / total`, 0 when nothing was processed
    pub success_rate: f64,
    /// Wall-clock seconds since the aggregator was created
    pub elapsed_secs: f64,
    /// Mean extraction latency of successful items, in seconds
    pub average_processing_secs: f64,
    /// `total / elapsed`, 0 when no time has passed
    pub files_per_second: f64,
}

/// Document written by `StatsAggregator::persist`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedStats {
    /// Summary at persist time
    pub summary: RunSummary,
    /// Every recorded error
    pub error_details: Vec<ErrorRecord>,
    /// When the document was written
    pub timestamp: DateTime<Utc>,
}
