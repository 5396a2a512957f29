//! Work items and their outcomes

use super::CompanyInfo;
use std::fmt;
use std::time::Duration;

/// One source object to process
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    key: String,
}

impl WorkItem {
    /// Create a work item for an object key
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Object key
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl From<String> for WorkItem {
    fn from(key: String) -> Self {
        Self { key }
    }
}

impl From<&str> for WorkItem {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Terminal result of processing one work item
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// Record extracted and uploaded
    Success {
        record: CompanyInfo,
        elapsed: Duration,
    },
    /// Nothing to do
    Skipped { reason: String },
    /// Failed at some step
    Failed { error: String, elapsed: Duration },
}

impl ExtractionOutcome {
    /// Short status label for progress logs
    pub fn label(&self) -> &'static str {
        match self {
            ExtractionOutcome::Success { .. } => "success",
            ExtractionOutcome::Skipped { .. } => "skipped",
            ExtractionOutcome::Failed { .. } => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Success { .. })
    }
}
