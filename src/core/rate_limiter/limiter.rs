//! Core rate limiter implementation

use super::types::{LimiterState, RateLimitGrant, RateLimitStatus};
use crate::config::models::rate_limit::{RateLimitConfig, RateLimitStrategy};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};

/// Process-wide limiter for calls to the extraction service
///
/// One instance is shared by reference between all workers. The state mutex is
/// held while waiting, so at most one caller sits between "slot is free" and
/// "slot is taken".
#[derive(Debug)]
pub struct RateLimiter {
    /// Rate limit configuration
    pub(super) config: RateLimitConfig,
    /// Window, spacing and grant bookkeeping
    pub(super) state: Mutex<LimiterState>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(mut config: RateLimitConfig) -> Self {
        config.max_requests = config.max_requests.max(1);
        config.window_secs = config.window_secs.max(1);
        Self {
            config,
            state: Mutex::new(LimiterState::default()),
        }
    }

    /// Wait until a call may proceed, then record the grant
    pub async fn acquire(&self) -> RateLimitGrant {
        if !self.config.enabled {
            return RateLimitGrant {
                waited: Duration::ZERO,
                window_count: 0,
            };
        }

        let requested_at = Instant::now();
        let mut state = self.state.lock().await;

        loop {
            let now = Instant::now();
            let window_wait = match self.config.strategy {
                RateLimitStrategy::SlidingWindow => self.sliding_window_wait(&mut state, now),
                RateLimitStrategy::FixedWindow => self.fixed_window_wait(&mut state, now),
            };
            let wait = window_wait.max(self.spacing_wait(&state, now));
            if wait.is_zero() {
                break;
            }

            if !window_wait.is_zero() {
                info!(
                    "Rate limit reached ({} per {:?}). Waiting {:.1} seconds...",
                    self.config.max_requests,
                    self.config.window(),
                    wait.as_secs_f64()
                );
            }
            tokio::time::sleep(wait).await;
        }

        let now = Instant::now();
        let window_count = self.record_grant(&mut state, now);
        let waited = now.saturating_duration_since(requested_at);
        debug!(
            "Rate limit grant {} in window after {:?}",
            window_count, waited
        );

        RateLimitGrant {
            waited,
            window_count,
        }
    }

    /// Current usage, without recording anything
    pub async fn status(&self) -> RateLimitStatus {
        let limit = self.config.max_requests;
        let mut state = self.state.lock().await;
        let now = Instant::now();

        let (current_count, reset_after) = match self.config.strategy {
            RateLimitStrategy::SlidingWindow => {
                let wait = self.sliding_window_wait(&mut state, now);
                (state.grants.len() as u32, wait)
            }
            RateLimitStrategy::FixedWindow => {
                let wait = self.fixed_window_wait(&mut state, now);
                (state.window_count, wait)
            }
        };

        RateLimitStatus {
            current_count,
            limit,
            remaining: limit.saturating_sub(current_count),
            reset_after,
            total_grants: state.total_grants,
        }
    }

    /// Check if rate limiting is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Get the configured limit
    pub fn limit(&self) -> u32 {
        self.config.max_requests
    }

    /// Get the configuration
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}
