use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::{CoverageError, CoverageResult, ScanErrors};

// =====================
// Type Aliases
// =====================

/// Files found by a tolerant walk, plus the entries that could not be visited.
pub type DiscoveredFiles = (Vec<PathBuf>, ScanErrors);

/// How many dialect definition files a directory walk should hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialectSelection {
    /// Stop at the first dialect file in walk order.
    First,
    /// Every dialect file under the root.
    #[default]
    All,
}

/// Locates dialect definition files and setup files on disk.
///
/// Walks are sorted by file name so every run visits files in the same order.
#[derive(Debug)]
pub struct Discoverer;

impl Discoverer {
    // =====================
    // Public API - Dialect Files
    // =====================

    /// Recursively scans `root` for files whose name ends with `suffix`.
    ///
    /// Unlike setup discovery this is strict: a walk error fails the call,
    /// since a missing dialect directory leaves nothing to audit.
    pub fn discover_dialect_files<P: AsRef<Path>>(
        root: P,
        suffix: &str,
        selection: DialectSelection,
    ) -> CoverageResult<Vec<PathBuf>> {
        let root = root.as_ref();
        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| CoverageError::Walk {
                root: root.to_path_buf(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_file() || !Self::name_ends_with(entry.path(), suffix) {
                continue;
            }

            debug!(path = %entry.path().display(), "found dialect file");
            files.push(entry.path().to_path_buf());
            if selection == DialectSelection::First {
                break;
            }
        }
        Ok(files)
    }

    // =====================
    // Public API - Setup Files
    // =====================

    /// Recursively scans `root` for files named `<prefix>*<suffix>`.
    ///
    /// Entries that cannot be visited are recorded against their path and the
    /// walk carries on.
    pub fn discover_setup_files<P: AsRef<Path>>(
        root: P,
        prefix: &str,
        suffix: &str,
    ) -> DiscoveredFiles {
        let root = root.as_ref();
        let mut files = Vec::new();
        let mut errors = ScanErrors::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                    errors.insert(path, e.to_string());
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if Self::name_starts_with(path, prefix) && Self::name_ends_with(path, suffix) {
                files.push(path.to_path_buf());
            }
        }
        (files, errors)
    }

    // =====================
    // Internal - File System Utilities
    // =====================

    fn file_name(path: &Path) -> Option<&str> {
        path.file_name().and_then(|name| name.to_str())
    }

    fn name_starts_with(path: &Path, prefix: &str) -> bool {
        Self::file_name(path).is_some_and(|name| name.starts_with(prefix))
    }

    fn name_ends_with(path: &Path, suffix: &str) -> bool {
        Self::file_name(path).is_some_and(|name| name.ends_with(suffix))
    }
}

/// Reads a file as Latin-1 text.
///
/// Dialect and setup sources are not reliably UTF-8. Every byte maps to the
/// code point of the same value, so decoding cannot fail.
pub fn read_latin1(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(bytes.iter().map(|&b| char::from(b)).collect())
}
