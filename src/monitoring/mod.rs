//! Run monitoring
//!
//! Statistics collected while a batch runs, reported and persisted at the end.

pub mod stats;

pub use stats::{RunSummary, StatsAggregator};
