//! Per-dialect test exclusions read from `<dialect>.ini`.
//!
//! The relevant line looks like
//!
//! ```text
//! ExpressionExclusions_Standard = string.ascii,date.*.nulls
//! ```
//!
//! Every entry is namespaced (`standard.string.ascii`). Entries containing `*`
//! become patterns; all others must match a setup file key exactly.

use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::CoverageConfig;
use crate::discovery::read_latin1;
use crate::errors::{CoverageError, CoverageResult};

const WILDCARD: char = '*';

#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    names: Vec<String>,
    patterns: Vec<Regex>,
}

impl Exclusions {
    /// Classifies already-namespaced entries into exact names and patterns.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut exclusions = Self::default();
        for entry in entries {
            let entry = entry.into();
            if !entry.contains(WILDCARD) {
                exclusions.names.push(entry);
                continue;
            }
            match wildcard_pattern(&entry) {
                Ok(pattern) => exclusions.patterns.push(pattern),
                Err(e) => {
                    warn!(%entry, error = %e, "unusable wildcard exclusion, matching it literally");
                    exclusions.names.push(entry);
                }
            }
        }
        exclusions
    }

    /// Parses the text of an ini file.
    ///
    /// The last line starting with `key` wins; its final whitespace-separated
    /// token is the comma-separated exclusion list.
    pub fn parse_ini(source: &str, key: &str, namespace: &str) -> Self {
        let Some(list) = source
            .lines()
            .filter(|line| line.starts_with(key))
            .filter_map(|line| line.split_whitespace().last())
            .last()
        else {
            return Self::default();
        };

        Self::from_entries(
            list.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(|entry| format!("{namespace}{entry}")),
        )
    }

    /// Loads the exclusions for `dialect` from `<ini_dir>/<dialect>.ini`.
    ///
    /// A missing ini file means nothing is excluded.
    pub fn load(dialect: &str, ini_dir: &Path, config: &CoverageConfig) -> CoverageResult<Self> {
        let path = ini_dir.join(format!("{dialect}.ini"));
        if !path.is_file() {
            debug!(path = %path.display(), "no ini file, nothing excluded");
            return Ok(Self::default());
        }

        let source = read_latin1(&path).map_err(|e| CoverageError::read(&path, e))?;
        let exclusions = Self::parse_ini(&source, &config.exclusion_key, &config.exclusion_namespace);
        debug!(
            path = %path.display(),
            names = exclusions.names.len(),
            patterns = exclusions.patterns.len(),
            "loaded exclusions"
        );
        Ok(exclusions)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.patterns.is_empty()
    }

    /// True when `key` is named exactly or matched by any pattern.
    pub fn excludes(&self, key: &str) -> bool {
        self.names.iter().any(|name| name == key)
            || self.patterns.iter().any(|pattern| pattern.is_match(key))
    }
}

/// Compiles a wildcard exclusion into a key pattern.
///
/// Each `*` stands for one or more word characters and everything else is
/// literal. The pattern must reach the end of the key and may start either at
/// the beginning of the key or after any `.`.
pub fn wildcard_pattern(entry: &str) -> Result<Regex, regex::Error> {
    let body = entry
        .split(WILDCARD)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\w+");
    Regex::new(&format!(r"(?:^|\.){body}$"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "ExpressionExclusions_Standard";

    #[test]
    fn wildcard_requires_a_segment() {
        let pattern = wildcard_pattern("standard.date.*.nulls").unwrap();
        assert!(pattern.is_match("standard.date.anything.nulls"));
        assert!(!pattern.is_match("standard.date.nulls"));
        assert!(!pattern.is_match("standard.date.anything.nulls.extra"));
    }

    #[test]
    fn wildcard_dots_are_literal() {
        let pattern = wildcard_pattern("standard.date.*.nulls").unwrap();
        assert!(!pattern.is_match("standardXdate.any.nulls"));
    }

    #[test]
    fn parses_marker_line_into_names_and_patterns() {
        let ini = "\
[Dialect]\n\
Name = mysql\n\
ExpressionExclusions_Standard = string.ascii,date.*.nulls,math.pi\n";
        let exclusions = Exclusions::parse_ini(ini, KEY, "standard.");
        assert_eq!(
            exclusions.names(),
            &["standard.string.ascii".to_string(), "standard.math.pi".to_string()]
        );
        assert_eq!(exclusions.patterns().len(), 1);
        assert!(exclusions.excludes("standard.string.ascii"));
        assert!(exclusions.excludes("standard.date.datetime.nulls"));
        assert!(!exclusions.excludes("standard.string.lower"));
    }

    #[test]
    fn file_without_marker_excludes_nothing() {
        let exclusions = Exclusions::parse_ini("Name = postgres\n", KEY, "standard.");
        assert!(exclusions.is_empty());
    }

    #[test]
    fn missing_ini_excludes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let exclusions =
            Exclusions::load("nobody", dir.path(), &CoverageConfig::default()).unwrap();
        assert!(exclusions.is_empty());
    }

    #[test]
    fn loads_ini_named_after_dialect() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("mysql.ini"),
            "ExpressionExclusions_Standard = string.ascii\n",
        )
        .unwrap();
        let exclusions = Exclusions::load("mysql", dir.path(), &CoverageConfig::default()).unwrap();
        assert!(exclusions.excludes("standard.string.ascii"));
    }
}
