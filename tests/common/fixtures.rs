//! Test fixtures for source pages and orchestrator setup

use about_extract::utils::error::{RetryConfig, RetryPolicy};
use about_extract::{MemoryStorage, RateLimitConfig, RateLimiter, WorkItem};
use std::sync::Arc;
use std::time::Duration;

/// Marker that makes `ScriptedExtractor` answer "no result"
pub const NO_RESULT_MARKER: &str = "KEINE ANGABEN";

/// Marker that makes `ScriptedExtractor` fail with a provider error
pub const REJECT_MARKER: &str = "ABGELEHNT";

/// Factory for source pages
pub struct PageFixtures;

impl PageFixtures {
    /// A page the scripted extractor turns into a record named `company`
    pub fn impressum(company: &str) -> String {
        format!(
            "{}\nImpressum\nAngaben gemäß § 5 TMG\nGeschäftsführer: Max Mustermann\nE-Mail: info@example.de",
            company
        )
    }

    /// A page the scripted extractor finds nothing in
    pub fn empty_page() -> String {
        format!("{}\nDiese Seite enthält keine Firmendaten.", NO_RESULT_MARKER)
    }

    /// A page the scripted extractor rejects
    pub fn rejected_page() -> String {
        format!("{}\nUngültige Anfrage", REJECT_MARKER)
    }

    /// Memory storage holding `count` pages under `prefix`
    pub fn storage_with_pages(prefix: &str, count: usize) -> (MemoryStorage, Vec<WorkItem>) {
        let storage = MemoryStorage::new();
        let mut items = Vec::with_capacity(count);
        for i in 0..count {
            let key = format!("{}page-{:03}.md", prefix, i);
            storage.insert(key.clone(), Self::impressum(&format!("Firma {} GmbH", i)));
            items.push(WorkItem::new(key));
        }
        (storage, items)
    }
}

/// Limiter allowing `max_requests` per `window_secs`, no spacing
pub fn limiter(max_requests: u32, window_secs: u64) -> Arc<RateLimiter> {
    Arc::new(RateLimiter::new(RateLimitConfig::new(
        max_requests,
        Duration::from_secs(window_secs),
        Duration::ZERO,
    )))
}

/// Limiter that never waits
pub fn unlimited() -> Arc<RateLimiter> {
    Arc::new(RateLimiter::new(RateLimitConfig {
        enabled: false,
        ..RateLimitConfig::default()
    }))
}

/// Retry policy without delays
pub fn immediate_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(RetryConfig::new(max_retries, Duration::ZERO))
}
