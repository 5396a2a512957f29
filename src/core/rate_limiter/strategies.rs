//! Rate limiting strategy implementations
//!
//! Each strategy answers "how long until the next grant is allowed"; the
//! caller sleeps and asks again.

use super::limiter::RateLimiter;
use super::types::LimiterState;
use crate::config::models::rate_limit::RateLimitStrategy;
use std::time::Duration;
use tokio::time::Instant;

impl RateLimiter {
    /// Sliding window: time until the oldest grant leaves the window
    pub(super) fn sliding_window_wait(&self, state: &mut LimiterState, now: Instant) -> Duration {
        let window = self.config.window();

        // Remove expired grants
        while let Some(&oldest) = state.grants.front() {
            if oldest + window <= now {
                state.grants.pop_front();
            } else {
                break;
            }
        }

        if (state.grants.len() as u32) < self.config.max_requests {
            return Duration::ZERO;
        }

        state
            .grants
            .front()
            .map(|&oldest| (oldest + window).saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }

    /// Fixed window: counter reset once the window has elapsed
    pub(super) fn fixed_window_wait(&self, state: &mut LimiterState, now: Instant) -> Duration {
        let window = self.config.window();

        let window_start = match state.window_start {
            Some(start) if now.saturating_duration_since(start) < window => start,
            _ => {
                state.window_start = Some(now);
                state.window_count = 0;
                now
            }
        };

        if state.window_count < self.config.max_requests {
            return Duration::ZERO;
        }

        window.saturating_sub(now.saturating_duration_since(window_start))
    }

    /// Minimum spacing between any two grants
    pub(super) fn spacing_wait(&self, state: &LimiterState, now: Instant) -> Duration {
        let min_spacing = self.config.min_spacing();
        match state.last_grant {
            Some(last) => min_spacing.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Record a grant at `now`; returns the grant count of the current window
    pub(super) fn record_grant(&self, state: &mut LimiterState, now: Instant) -> u32 {
        state.last_grant = Some(now);
        state.total_grants += 1;

        match self.config.strategy {
            RateLimitStrategy::SlidingWindow => {
                state.grants.push_back(now);
                state.grants.len() as u32
            }
            RateLimitStrategy::FixedWindow => {
                state.window_count += 1;
                state.window_count
            }
        }
    }
}
