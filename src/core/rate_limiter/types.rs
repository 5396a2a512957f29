//! Rate limiter types and data structures

use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Outcome of a granted `acquire()`
#[derive(Debug, Clone, Copy)]
pub struct RateLimitGrant {
    /// How long the caller was held back
    pub waited: Duration,
    /// Grants in the current window, this one included
    pub window_count: u32,
}

/// Read-only view of the limiter
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    /// Grants counted in the current window
    pub current_count: u32,
    /// Maximum grants per window
    pub limit: u32,
    /// Remaining grants in the current window
    pub remaining: u32,
    /// Time until a slot frees up (zero when one is free)
    pub reset_after: Duration,
    /// Grants since the limiter was created
    pub total_grants: u64,
}

/// Shared limiter state, guarded by the limiter's mutex
#[derive(Debug, Default)]
pub(super) struct LimiterState {
    /// Grant instants inside the current sliding window
    pub(super) grants: VecDeque<Instant>,
    /// Start of the current fixed window
    pub(super) window_start: Option<Instant>,
    /// Grants counted in the current fixed window
    pub(super) window_count: u32,
    /// Most recent grant
    pub(super) last_grant: Option<Instant>,
    /// Grants since creation
    pub(super) total_grants: u64,
}
