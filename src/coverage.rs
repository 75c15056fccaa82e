//! Aggregation of setup test cases and cross-checking against declarations.

use std::collections::{BTreeMap, BTreeSet};

use crate::dialect::FunctionDeclaration;
use crate::setup::SetupFileRecord;
use crate::signature::Signature;

/// Every signature exercised for one function, split by whether the setup file
/// that exercised it was excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageEntry {
    pub function_name: String,
    pub tested: BTreeSet<Signature>,
    pub skipped: BTreeSet<Signature>,
}

impl CoverageEntry {
    fn new(function_name: &str) -> Self {
        Self {
            function_name: function_name.to_string(),
            ..Self::default()
        }
    }
}

/// Coverage entries keyed by lowercase function name.
pub type CoverageMap = BTreeMap<String, CoverageEntry>;

/// Folds every test case of every record into per-function signature sets.
pub fn aggregate<'a, I>(records: I) -> CoverageMap
where
    I: IntoIterator<Item = &'a SetupFileRecord>,
{
    let mut coverage = CoverageMap::new();
    for record in records {
        for case in &record.tests {
            let entry = coverage
                .entry(case.function_name.clone())
                .or_insert_with(|| CoverageEntry::new(&case.function_name));
            let bucket = if record.skip {
                &mut entry.skipped
            } else {
                &mut entry.tested
            };
            bucket.insert(case.arguments.clone());
        }
    }
    coverage
}

/// Annotates each declaration with the coverage evidence for its signature.
///
/// A tested signature always wins: a declaration already marked tested is never
/// downgraded to skipped.
pub fn check_declarations(coverage: &CoverageMap, declarations: &mut [FunctionDeclaration]) {
    for declaration in declarations.iter_mut() {
        let Some(entry) = coverage.get(&declaration.name.to_lowercase()) else {
            continue;
        };
        if entry.tested.contains(&declaration.arguments) {
            declaration.tested = true;
            declaration.skipped = false;
        } else if entry.skipped.contains(&declaration.arguments) && !declaration.tested {
            declaration.skipped = true;
        }
    }
}

/// Counts of declarations per coverage verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverageSummary {
    pub total: usize,
    pub tested: usize,
    pub skipped: usize,
    pub untested: usize,
}

impl CoverageSummary {
    pub fn of(declarations: &[FunctionDeclaration]) -> Self {
        declarations
            .iter()
            .fold(Self::default(), |mut summary, declaration| {
                summary.total += 1;
                if declaration.tested {
                    summary.tested += 1;
                } else if declaration.skipped {
                    summary.skipped += 1;
                } else {
                    summary.untested += 1;
                }
                summary
            })
    }

    /// Share of declarations with a tested signature, in percent.
    pub fn tested_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.tested as f64 / self.total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::TestCase;

    fn case(name: &str, args: &[&str]) -> TestCase {
        TestCase {
            function_name: name.to_string(),
            arguments: Signature::of(args.iter().copied()),
        }
    }

    fn record(key: &str, skip: bool, tests: Vec<TestCase>) -> SetupFileRecord {
        SetupFileRecord {
            key: key.to_string(),
            tests,
            skip,
        }
    }

    #[test]
    fn aggregate_splits_tested_and_skipped_and_deduplicates() {
        let records = vec![
            record("a", false, vec![case("abs", &["int"]), case("abs", &["int"])]),
            record("b", true, vec![case("abs", &["real"]), case("left", &["str", "int"])]),
        ];
        let coverage = aggregate(&records);

        let abs = &coverage["abs"];
        assert_eq!(abs.tested.len(), 1);
        assert!(abs.tested.contains(&Signature::of(["int"])));
        assert!(abs.skipped.contains(&Signature::of(["real"])));

        let left = &coverage["left"];
        assert!(left.tested.is_empty());
        assert_eq!(left.skipped.len(), 1);
        assert!(!coverage.contains_key("upper"));
    }

    #[test]
    fn tested_signature_wins_over_skipped() {
        let records = vec![
            record("a", true, vec![case("abs", &["int"])]),
            record("b", false, vec![case("abs", &["int"])]),
        ];
        let coverage = aggregate(&records);
        let mut declarations = vec![FunctionDeclaration::new("ABS", Signature::of(["int"]))];
        check_declarations(&coverage, &mut declarations);
        assert!(declarations[0].tested);
        assert!(!declarations[0].skipped);
    }

    #[test]
    fn skipped_only_signature_marks_skipped() {
        let records = vec![record("a", true, vec![case("left", &["str", "int"])])];
        let coverage = aggregate(&records);
        let mut declarations = vec![FunctionDeclaration::new("LEFT", Signature::of(["str", "int"]))];
        check_declarations(&coverage, &mut declarations);
        assert!(!declarations[0].tested);
        assert!(declarations[0].skipped);
    }

    #[test]
    fn already_tested_declaration_is_not_downgraded() {
        let records = vec![record("a", true, vec![case("abs", &["int"])])];
        let coverage = aggregate(&records);
        let mut declaration = FunctionDeclaration::new("ABS", Signature::of(["int"]));
        declaration.tested = true;
        let mut declarations = vec![declaration];
        check_declarations(&coverage, &mut declarations);
        assert!(declarations[0].tested);
        assert!(!declarations[0].skipped);
    }

    #[test]
    fn unmatched_declarations_keep_both_flags_false() {
        let records = vec![record("a", false, vec![case("abs", &["int"])])];
        let coverage = aggregate(&records);
        let mut declarations = vec![
            FunctionDeclaration::new("FOO", Signature::of(["int", "int"])),
            FunctionDeclaration::new("ABS", Signature::of(["real"])),
            FunctionDeclaration::new("ABS", Signature::Unknown),
        ];
        check_declarations(&coverage, &mut declarations);
        assert!(declarations.iter().all(|d| !d.tested && !d.skipped));
    }

    #[test]
    fn summary_counts_each_verdict_once() {
        let mut tested = FunctionDeclaration::new("A", Signature::Unknown);
        tested.tested = true;
        let mut skipped = FunctionDeclaration::new("B", Signature::Unknown);
        skipped.skipped = true;
        let untested = FunctionDeclaration::new("C", Signature::Unknown);

        let summary = CoverageSummary::of(&[tested, skipped, untested, FunctionDeclaration::new("D", Signature::Unknown)]);
        assert_eq!(
            summary,
            CoverageSummary {
                total: 4,
                tested: 1,
                skipped: 1,
                untested: 2,
            }
        );
        assert_eq!(summary.tested_percent(), 25.0);
    }
}
