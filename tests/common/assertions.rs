//! Custom test assertions

use about_extract::RunReport;
use std::time::Duration;
use tokio::time::Instant;

/// Assertions for RunReport
pub trait RunReportAssertions {
    /// Assert the outcome counts add up to the total
    fn assert_consistent(&self);

    /// Assert the exact outcome counts
    fn assert_counts(&self, successful: u64, skipped: u64, failed: u64);
}

impl RunReportAssertions for RunReport {
    fn assert_consistent(&self) {
        let s = &self.statistics;
        assert!(
            s.is_consistent(),
            "successful ({}) + skipped ({}) + failed ({}) != total ({})",
            s.successful,
            s.skipped,
            s.failed,
            s.total
        );
        assert_eq!(s.errors.len() as u64, s.failed);
        assert_eq!(s.durations.len() as u64, s.successful);
    }

    fn assert_counts(&self, successful: u64, skipped: u64, failed: u64) {
        self.assert_consistent();
        assert_eq!(
            (self.summary.successful, self.summary.skipped, self.summary.errors),
            (successful, skipped, failed),
            "unexpected (successful, skipped, failed)"
        );
    }
}

/// Assert no `max + 1` sorted instants fall within one `window`
pub fn assert_rolling_window(times: &[Instant], max: usize, window: Duration) {
    for i in max..times.len() {
        let span = times[i] - times[i - max];
        assert!(
            span >= window,
            "calls {} and {} are only {:?} apart; more than {} calls in {:?}",
            i - max,
            i,
            span,
            max,
            window
        );
    }
}

/// Assert two values are approximately equal (for floats)
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_approx_eq!($left, $right, 1e-6_f64)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {
        let (left, right, eps) = ($left as f64, $right as f64, $epsilon as f64);
        assert!(
            (left - right).abs() < eps,
            "assertion failed: `{} ≈ {}` (epsilon: {})",
            left,
            right,
            eps
        );
    };
}
