//! Rate Limiting Implementation
//!
//! Blocking rate limiter shared by every worker of a run: a cap on grants per
//! window plus a minimum spacing between grants.

mod limiter;
mod strategies;
mod types;


// Re-export public types
pub use crate::config::models::rate_limit::{RateLimitConfig, RateLimitStrategy};
pub use limiter::RateLimiter;
pub use types::{RateLimitGrant, RateLimitStatus};
