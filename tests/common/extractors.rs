//! Scripted extractor for pipeline tests

use super::fixtures::{NO_RESULT_MARKER, REJECT_MARKER};
use about_extract::{CompanyInfo, ExtractError, Extractor, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Extractor whose answer depends on markers in the text
///
/// The first line of a regular page becomes the company name. Every call
/// records the instant it started.
#[derive(Debug, Default)]
pub struct ScriptedExtractor {
    latency: Duration,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a slow service
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of calls so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Call start times, sorted
    pub fn call_times(&self) -> Vec<Instant> {
        let mut times = self.calls.lock().clone();
        times.sort();
        times
    }
}

#[async_trait]
impl Extractor for ScriptedExtractor {
    async fn extract(&self, text: &str) -> Result<Option<CompanyInfo>> {
        self.calls.lock().push(Instant::now());

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if text.contains(REJECT_MARKER) {
            return Err(ExtractError::Provider {
                status: 400,
                message: "rejected".to_string(),
            });
        }
        if text.contains(NO_RESULT_MARKER) {
            return Ok(None);
        }

        let company_name = text.lines().next().unwrap_or_default().trim().to_string();
        Ok(Some(CompanyInfo {
            company_name,
            owner_name: "Max Mustermann".to_string(),
            position: "Geschäftsführer".to_string(),
            email: "info@example.de".to_string(),
            ..CompanyInfo::default()
        }))
    }
}
