//! Dialect Coverage Error Handling
//!
//! Only failures that stop a whole operation live here. Per-file problems met
//! while walking setup directories are collected in [`ScanErrors`] instead, so
//! a single unreadable file never aborts a scan.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Per-file failures collected during a directory scan, keyed by path.
pub type ScanErrors = BTreeMap<PathBuf, String>;

/// Result alias used across the crate.
pub type CoverageResult<T> = Result<T, CoverageError>;

#[derive(Error, Diagnostic, Debug)]
pub enum CoverageError {
    #[error("failed to read '{}'", path.display())]
    #[diagnostic(
        code(dialect_coverage::io::read),
        help("check that the path exists and is readable")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{}'", path.display())]
    #[diagnostic(
        code(dialect_coverage::io::write),
        help("check that the output directory exists and is writable")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report '{}'", path.display())]
    #[diagnostic(code(dialect_coverage::report::csv))]
    Report {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid configuration in '{}'", path.display())]
    #[diagnostic(
        code(dialect_coverage::config::invalid),
        help("every key is optional; remove unknown keys or fix their types")
    )]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to walk '{}': {message}", root.display())]
    #[diagnostic(code(dialect_coverage::discovery::walk))]
    Walk { root: PathBuf, message: String },
}

impl CoverageError {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
