//! Test cases declared in expression setup files.
//!
//! Setup files hold one invocation per line, e.g. `DATEADD('day', 1, [date0])`.
//! Each file becomes a [`SetupFileRecord`] keyed by its directory and name:
//! `standard/setup.date.add.txt` is keyed `standard.date.add`.

use std::collections::BTreeMap;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::arguments::{classify_argument, split_arguments};
use crate::config::CoverageConfig;
use crate::discovery::{read_latin1, Discoverer};
use crate::errors::ScanErrors;
use crate::exclusions::Exclusions;
use crate::signature::Signature;

lazy_static! {
    /// Groups: function name, argument text. Only the start of the line is anchored.
    static ref TEST_CASE_LINE: Regex =
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\((.+)\)").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Always lowercase.
    pub function_name: String,
    pub arguments: Signature,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupFileRecord {
    pub key: String,
    pub tests: Vec<TestCase>,
    /// Set when the dialect's exclusions cover this file.
    pub skip: bool,
}

/// Everything a scan of a setup tree produced.
#[derive(Debug, Default)]
pub struct SetupScan {
    pub records: BTreeMap<String, SetupFileRecord>,
    pub errors: ScanErrors,
}

impl SetupScan {
    /// Marks every record whose key is excluded as skipped.
    pub fn apply_exclusions(&mut self, exclusions: &Exclusions) {
        if exclusions.is_empty() {
            return;
        }
        for record in self.records.values_mut() {
            if exclusions.excludes(&record.key) {
                debug!(key = %record.key, "setup file excluded");
                record.skip = true;
            }
        }
    }

    pub fn test_case_count(&self) -> usize {
        self.records.values().map(|r| r.tests.len()).sum()
    }
}

/// Parses setup files found under a directory tree.
#[derive(Debug, Clone)]
pub struct SetupParser {
    prefix: String,
    suffix: String,
    process_arguments: bool,
}

impl SetupParser {
    pub fn new(config: &CoverageConfig) -> Self {
        Self {
            prefix: config.setup_prefix.clone(),
            suffix: config.setup_suffix.clone(),
            process_arguments: config.process_arguments,
        }
    }

    /// Keeps arguments as raw tokens instead of classifying them.
    pub fn raw_arguments(mut self) -> Self {
        self.process_arguments = false;
        self
    }

    /// Walks `root`, parsing every setup file.
    ///
    /// A file that cannot be read is recorded in [`SetupScan::errors`] and the
    /// walk continues. Two files with the same key resolve to the later one in
    /// walk order.
    pub fn scan(&self, root: &Path) -> SetupScan {
        let (files, mut errors) = Discoverer::discover_setup_files(root, &self.prefix, &self.suffix);
        let mut records = BTreeMap::new();

        for path in files {
            let source = match read_latin1(&path) {
                Ok(source) => source,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "could not read setup file");
                    errors.insert(path, e.to_string());
                    continue;
                }
            };
            let key = self.record_key(&path);
            let tests = self.parse_source(&source);
            debug!(%key, cases = tests.len(), "parsed setup file");
            records.insert(
                key.clone(),
                SetupFileRecord {
                    key,
                    tests,
                    skip: false,
                },
            );
        }

        info!(
            root = %root.display(),
            files = records.len(),
            errors = errors.len(),
            "scanned setup files"
        );
        SetupScan { records, errors }
    }

    /// Extracts one test case per `NAME(args)` line. Other lines are ignored.
    pub fn parse_source(&self, source: &str) -> Vec<TestCase> {
        source
            .lines()
            .filter_map(|line| TEST_CASE_LINE.captures(line.trim()))
            .map(|caps| TestCase {
                function_name: caps[1].to_lowercase(),
                arguments: self.signature(&caps[2]),
            })
            .collect()
    }

    fn signature(&self, arguments: &str) -> Signature {
        let tokens = split_arguments(arguments).map(str::trim);
        if self.process_arguments {
            Signature::Known(tokens.map(classify_argument).collect())
        } else {
            Signature::Known(tokens.map(|t| Some(t.to_string())).collect())
        }
    }

    /// `<parent dir>.<file name without prefix and suffix>`.
    pub fn record_key(&self, path: &Path) -> String {
        let directory = path
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = file_name.strip_suffix(&self.suffix).unwrap_or(&file_name);
        let dotted_prefix = format!("{}.", self.prefix);
        let name = stem.strip_prefix(&dotted_prefix).unwrap_or(stem);
        format!("{directory}.{name}")
    }
}
