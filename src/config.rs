//! Run configuration.
//!
//! Every field has a default matching the conventions of the expression test
//! tree, so a config file is only needed to point the tool at a differently
//! named layout.

use std::path::Path;

use serde::Deserialize;

use crate::errors::{CoverageError, CoverageResult};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoverageConfig {
    /// Line prefix in `<dialect>.ini` that carries the excluded test list.
    pub exclusion_key: String,
    /// Namespace prepended to every excluded test name.
    pub exclusion_namespace: String,
    /// File name suffix identifying dialect definition files.
    pub dialect_suffix: String,
    /// File name prefix identifying setup files.
    pub setup_prefix: String,
    /// File name suffix identifying setup files.
    pub setup_suffix: String,
    /// Classify setup-file arguments into type tags when building dialect reports.
    pub process_arguments: bool,
    /// File name of the aggregate report written by `extract`.
    pub aggregate_report: String,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            exclusion_key: "ExpressionExclusions_Standard".to_string(),
            exclusion_namespace: "standard.".to_string(),
            dialect_suffix: "Dialect.cpp".to_string(),
            setup_prefix: "setup".to_string(),
            setup_suffix: ".txt".to_string(),
            process_arguments: true,
            aggregate_report: "all_test_cases.csv".to_string(),
        }
    }
}

impl CoverageConfig {
    /// Parses a YAML config document.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to an empty map.
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
    }

    /// Loads the config at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> CoverageResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let source = std::fs::read_to_string(path).map_err(|e| CoverageError::read(path, e))?;
        Self::from_yaml(&source).map_err(|source| CoverageError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
