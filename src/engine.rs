use std::path::{Path, PathBuf};

use miette::Report;
use tracing::{debug, error, info, warn};

use crate::{
    config::CoverageConfig,
    coverage::{aggregate, check_declarations, CoverageMap, CoverageSummary},
    dialect::{dialect_name, parse_dialect_file, FunctionDeclaration},
    discovery::{DialectSelection, Discoverer},
    errors::{CoverageError, CoverageResult, ScanErrors},
    exclusions::Exclusions,
    report::{write_aggregate_report, write_dialect_report},
    setup::SetupParser,
};

// ============================================================================
// ERROR PRESENTATION
// ============================================================================

/// Renders an error through miette's report handler on stderr.
pub fn print_error(error: CoverageError) {
    let report = Report::new(error);
    eprintln!("{report:?}");
}

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Coverage verdicts for one dialect, before anything is written to disk.
#[derive(Debug)]
pub struct DialectAudit {
    pub dialect: String,
    pub declarations: Vec<FunctionDeclaration>,
    pub scan_errors: ScanErrors,
}

impl DialectAudit {
    pub fn summary(&self) -> CoverageSummary {
        CoverageSummary::of(&self.declarations)
    }
}

/// A status line for the user plus the setup files that could not be read.
#[derive(Debug)]
pub struct RunOutcome {
    pub status: String,
    pub scan_errors: ScanErrors,
}

/// The result of checking one dialect file during `check_all`.
#[derive(Debug)]
pub struct DialectCheck {
    pub dialect_file: PathBuf,
    pub outcome: CoverageResult<RunOutcome>,
}

/// Every test case in a setup tree, with arguments kept as raw tokens.
#[derive(Debug)]
pub struct TestCaseInventory {
    pub coverage: CoverageMap,
    pub scan_errors: ScanErrors,
}

// ============================================================================
// COVERAGE PIPELINE - Single entry point for every CLI command
// ============================================================================

/// Runs the parse → exclude → aggregate → check → report sequence.
#[derive(Debug, Clone, Default)]
pub struct CoveragePipeline {
    pub config: CoverageConfig,
}

impl CoveragePipeline {
    pub fn new(config: CoverageConfig) -> Self {
        Self { config }
    }

    /// Cross-references one dialect file against the setup tree.
    pub fn audit_dialect(
        &self,
        dialect_file: &Path,
        ini_dir: &Path,
        setup_dir: &Path,
    ) -> CoverageResult<DialectAudit> {
        let dialect = dialect_name(dialect_file);
        let exclusions = Exclusions::load(&dialect, ini_dir, &self.config)?;
        let mut declarations = parse_dialect_file(dialect_file)?;

        let mut scan = SetupParser::new(&self.config).scan(setup_dir);
        scan.apply_exclusions(&exclusions);
        debug!(
            %dialect,
            cases = scan.test_case_count(),
            excluded = scan.records.values().filter(|r| r.skip).count(),
            "setup tree ready"
        );

        let coverage = aggregate(scan.records.values());
        check_declarations(&coverage, &mut declarations);

        Ok(DialectAudit {
            dialect,
            declarations,
            scan_errors: scan.errors,
        })
    }

    /// Audits one dialect and writes `<dialect>.csv` into `output_dir`.
    pub fn check_dialect(
        &self,
        dialect_file: &Path,
        ini_dir: &Path,
        setup_dir: &Path,
        output_dir: &Path,
    ) -> CoverageResult<RunOutcome> {
        let audit = self.audit_dialect(dialect_file, ini_dir, setup_dir)?;
        Self::report_scan_errors(&audit.scan_errors);

        if audit.declarations.is_empty() {
            return Ok(RunOutcome {
                status: format!("No test cases for {}", audit.dialect),
                scan_errors: audit.scan_errors,
            });
        }

        let path = output_dir.join(format!("{}.csv", audit.dialect));
        write_dialect_report(&path, &audit.declarations)?;

        let summary = audit.summary();
        info!(
            dialect = %audit.dialect,
            total = summary.total,
            tested = summary.tested,
            skipped = summary.skipped,
            untested = summary.untested,
            percent = summary.tested_percent(),
            "dialect coverage written"
        );
        Ok(RunOutcome {
            status: format!("Results written to {}", path.display()),
            scan_errors: audit.scan_errors,
        })
    }

    /// Discovers dialect files under `dialect_dir` and checks each one.
    ///
    /// A dialect that fails is recorded in its [`DialectCheck`] and the
    /// remaining dialects are still checked. An empty result means no dialect
    /// file was found.
    pub fn check_all(
        &self,
        dialect_dir: &Path,
        selection: DialectSelection,
        ini_dir: &Path,
        setup_dir: &Path,
        output_dir: &Path,
    ) -> CoverageResult<Vec<DialectCheck>> {
        let files =
            Discoverer::discover_dialect_files(dialect_dir, &self.config.dialect_suffix, selection)?;
        let checks = files
            .into_iter()
            .map(|dialect_file| {
                let outcome = self.check_dialect(&dialect_file, ini_dir, setup_dir, output_dir);
                if let Err(e) = &outcome {
                    error!(path = %dialect_file.display(), error = %e, "dialect check failed");
                }
                DialectCheck {
                    dialect_file,
                    outcome,
                }
            })
            .collect();
        Ok(checks)
    }

    /// Collects every test case under `setup_dir`, ignoring exclusions.
    pub fn collect_test_cases(&self, setup_dir: &Path) -> TestCaseInventory {
        let scan = SetupParser::new(&self.config).raw_arguments().scan(setup_dir);
        TestCaseInventory {
            coverage: aggregate(scan.records.values()),
            scan_errors: scan.errors,
        }
    }

    /// Writes every tested (function, arguments) pair under `setup_dir` to the
    /// aggregate report in `output_dir`.
    pub fn extract_all_test_cases(
        &self,
        setup_dir: &Path,
        output_dir: &Path,
    ) -> CoverageResult<RunOutcome> {
        let inventory = self.collect_test_cases(setup_dir);
        Self::report_scan_errors(&inventory.scan_errors);

        if inventory.coverage.is_empty() {
            return Ok(RunOutcome {
                status: format!("No test cases found in {}", setup_dir.display()),
                scan_errors: inventory.scan_errors,
            });
        }

        let path = output_dir.join(&self.config.aggregate_report);
        write_aggregate_report(&path, &inventory.coverage)?;
        info!(functions = inventory.coverage.len(), "aggregate report written");
        Ok(RunOutcome {
            status: format!("CSV file written to {}", path.display()),
            scan_errors: inventory.scan_errors,
        })
    }

    fn report_scan_errors(errors: &ScanErrors) {
        if !errors.is_empty() {
            warn!(count = errors.len(), "some setup files could not be read");
        }
    }
}
