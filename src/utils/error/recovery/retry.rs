//! Retry mechanism with exponential backoff

use super::types::RetryConfig;
use crate::utils::error::ExtractError;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Errors that know whether another attempt could succeed
pub trait Retryable {
    /// `true` for transient conditions
    fn is_retryable(&self) -> bool;
}

impl Retryable for ExtractError {
    fn is_retryable(&self) -> bool {
        ExtractError::is_retryable(self)
    }
}

/// Retry mechanism with exponential backoff
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Copy of this policy with a call-site specific configuration
    pub fn with_config(&self, config: RetryConfig) -> Self {
        Self::new(config)
    }

    /// Current configuration
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute a function with retry logic
    ///
    /// Non-retryable errors are returned after the first attempt.
    pub async fn call<F, Fut, R, E>(&self, mut f: F) -> std::result::Result<R, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
        E: Retryable + Display,
    {
        let max_attempts = self.config.max_attempts();
        let mut attempt = 0;
        let mut delay = self.config.initial_delay.min(self.config.max_delay);

        loop {
            attempt += 1;

            match f().await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!("Retry succeeded on attempt {}", attempt);
                    }
                    return Ok(result);
                }
                Err(error) => {
                    if !error.is_retryable() {
                        debug!("Attempt {} failed with non-retryable error: {}", attempt, error);
                        return Err(error);
                    }

                    if attempt >= max_attempts {
                        error!("All {} attempts failed: {}", attempt, error);
                        return Err(error);
                    }

                    let actual_delay = self.jittered(delay);
                    warn!(
                        "Attempt {}/{} failed: {}, retrying in {:?}",
                        attempt, max_attempts, error, actual_delay
                    );

                    tokio::time::sleep(actual_delay).await;
                    delay = self.next_delay(delay);
                }
            }
        }
    }

    /// Delay following `delay` under exponential backoff, capped at `max_delay`
    pub fn next_delay(&self, delay: Duration) -> Duration {
        let next = delay.as_secs_f64() * self.config.backoff_factor;
        if !next.is_finite() || next >= self.config.max_delay.as_secs_f64() {
            self.config.max_delay
        } else {
            Duration::from_secs_f64(next.max(0.0))
        }
    }

    fn jittered(&self, delay: Duration) -> Duration {
        if !self.config.jitter {
            return delay;
        }
        let jitter_factor = 0.1;
        let jitter = delay.as_secs_f64() * jitter_factor * (rand::random::<f64>() - 0.5) * 2.0;
        Duration::from_secs_f64((delay.as_secs_f64() + jitter).max(0.0))
    }
}
