//! Dialect test coverage auditing.
//!
//! Cross-references the functions a dialect registers in its definition file
//! against the test cases declared in expression setup files, and reports each
//! registration as tested, covered only by excluded tests, or untested.

pub use crate::engine::CoveragePipeline;
pub use crate::errors::{CoverageError, CoverageResult};

pub mod arguments;
pub mod cli;
pub mod config;
pub mod coverage;
pub mod dialect;
pub mod discovery;
pub mod engine;
pub mod errors;
pub mod exclusions;
pub mod report;
pub mod setup;
pub mod signature;
