//! Integration tests for about-extract
//!
//! These tests drive the whole pipeline through real storage backends and
//! the real limiter, retry policy and statistics.

pub mod batch_tests;
pub mod config_tests;
pub mod storage_tests;
