//! Extractor trait

use crate::core::models::CompanyInfo;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Maps raw page text to a company record
///
/// `Ok(None)` means the text was processed but held nothing usable. Errors
/// are classified so the retry policy can tell transient failures apart.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract a record from `text`
    async fn extract(&self, text: &str) -> Result<Option<CompanyInfo>>;
}
