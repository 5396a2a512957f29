//! Run statistics
//!
//! Counters, timing samples and error records collected by the batch workers,
//! plus the end-of-run report and its JSON persistence.

mod aggregator;
mod report;
mod types;


pub use aggregator::{DEFAULT_REPORT_ERRORS, StatsAggregator};
pub use report::StatsReport;
pub use types::{ErrorRecord, PersistedStats, RunStatistics, RunSummary};
