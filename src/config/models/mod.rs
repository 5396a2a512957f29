//! Configuration data models

pub mod extraction;
pub mod logging;
pub mod rate_limit;
pub mod storage;

pub use extraction::*;
pub use logging::*;
pub use rate_limit::*;
pub use storage::*;
