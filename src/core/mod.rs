//! Core pipeline: models, extraction, rate limiting and batch orchestration

pub mod batch;
pub mod extraction;
pub mod models;
pub mod rate_limiter;
