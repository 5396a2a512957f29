//! Core data models

mod company;
mod work;

pub use company::{CompanyInfo, JSON_CONTENT_TYPE};
pub use work::{ExtractionOutcome, WorkItem};
