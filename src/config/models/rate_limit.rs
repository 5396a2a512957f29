//! Rate limiting configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rate limiting configuration for calls to the extraction service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum grants per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// Minimum gap between two grants, in seconds
    #[serde(default = "default_delay_between_requests")]
    pub delay_between_requests_secs: f64,
    /// Rate limiting strategy
    #[serde(default)]
    pub strategy: RateLimitStrategy,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            delay_between_requests_secs: default_delay_between_requests(),
            strategy: RateLimitStrategy::default(),
        }
    }
}

impl RateLimitConfig {
    /// Config allowing `max_requests` per `window` with `min_spacing` between grants
    pub fn new(max_requests: u32, window: Duration, min_spacing: Duration) -> Self {
        Self {
            enabled: true,
            max_requests,
            window_secs: window.as_secs().max(1),
            delay_between_requests_secs: min_spacing.as_secs_f64(),
            strategy: RateLimitStrategy::default(),
        }
    }

    /// Use the given strategy
    pub fn with_strategy(mut self, strategy: RateLimitStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Window length
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Minimum spacing between grants
    pub fn min_spacing(&self) -> Duration {
        Duration::from_secs_f64(self.delay_between_requests_secs.max(0.0))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_requests == 0 {
            return Err("max_requests must be greater than 0".to_string());
        }
        if self.window_secs == 0 {
            return Err("window_secs must be greater than 0".to_string());
        }
        if !self.delay_between_requests_secs.is_finite() || self.delay_between_requests_secs < 0.0
        {
            return Err("delay_between_requests_secs must be a non-negative number".to_string());
        }
        Ok(())
    }
}

/// Rate limiting strategy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitStrategy {
    /// Log of grant instants; bounds every rolling window
    #[default]
    SlidingWindow,
    /// Counter reset at window boundaries
    FixedWindow,
}

impl std::str::FromStr for RateLimitStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sliding_window" | "sliding" => Ok(RateLimitStrategy::SlidingWindow),
            "fixed_window" | "fixed" => Ok(RateLimitStrategy::FixedWindow),
            other => Err(format!("Unknown rate limit strategy: {}", other)),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_requests() -> u32 {
    20
}

fn default_window_secs() -> u64 {
    60
}

fn default_delay_between_requests() -> f64 {
    3.0
}
