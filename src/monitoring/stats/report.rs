//! Human-readable run report

use super::types::{ErrorRecord, RunSummary};
use std::fmt;

const RULE_WIDTH: usize = 70;

/// Rendered end-of-run summary with a capped error list
#[derive(Debug, Clone)]
pub struct StatsReport {
    summary: RunSummary,
    errors: Vec<ErrorRecord>,
    max_errors: usize,
}

impl StatsReport {
    pub(super) fn new(summary: RunSummary, errors: Vec<ErrorRecord>, max_errors: usize) -> Self {
        Self {
            summary,
            errors,
            max_errors,
        }
    }

    /// The summary being rendered
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Errors left out of the detail list
    pub fn hidden_errors(&self) -> usize {
        self.errors.len().saturating_sub(self.max_errors)
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);
        let s = &self.summary;

        writeln!(f, "{}", heavy)?;
        writeln!(f, "EXTRACTION STATISTICS")?;
        writeln!(f, "{}", heavy)?;
        writeln!(f, "  Total Files:          {}", s.total_files)?;
        writeln!(f, "  Successful:           {}", s.successful)?;
        writeln!(f, "  Skipped:              {}", s.skipped)?;
        writeln!(f, "  Errors:               {}", s.errors)?;
        writeln!(f, "  Success Rate:         {:.1}%", s.success_rate * 100.0)?;
        writeln!(f, "{}", light)?;
        writeln!(f, "  Elapsed Time:         {:.2}s", s.elapsed_secs)?;
        writeln!(f, "  Avg Processing Time:  {:.2}s", s.average_processing_secs)?;
        writeln!(f, "  Files/Second:         {:.2}", s.files_per_second)?;
        write!(f, "{}", heavy)?;

        if !self.errors.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "ERROR DETAILS:")?;
            for (idx, error) in self.errors.iter().take(self.max_errors).enumerate() {
                writeln!(f)?;
                writeln!(f, "  {}. {}", idx + 1, error.key)?;
                write!(f, "     Error: {}", error.message)?;
            }
            let hidden = self.hidden_errors();
            if hidden > 0 {
                writeln!(f)?;
                write!(f, "  ... and {} more errors", hidden)?;
            }
        }

        Ok(())
    }
}
