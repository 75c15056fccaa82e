//! CSV rendering of coverage results.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::coverage::CoverageMap;
use crate::dialect::FunctionDeclaration;
use crate::errors::{CoverageError, CoverageResult};

#[derive(Debug, Serialize)]
struct DeclarationRow<'a> {
    function: &'a str,
    arguments: String,
    tested: &'static str,
    skipped: &'static str,
}

#[derive(Debug, Serialize)]
struct AggregateRow<'a> {
    function: &'a str,
    args: String,
}

const DECLARATION_HEADER: [&str; 4] = ["function", "arguments", "tested", "skipped"];
const AGGREGATE_HEADER: [&str; 2] = ["function", "args"];

/// Headers are written explicitly so an empty report still carries them.
fn csv_writer<W: Write>(writer: W, header: &[&str]) -> Result<csv::Writer<W>, csv::Error> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(header)?;
    Ok(csv)
}

fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Writes one row per declaration: `function,arguments,tested,skipped`.
pub fn write_declarations<W: Write>(
    writer: W,
    declarations: &[FunctionDeclaration],
) -> Result<(), csv::Error> {
    let mut csv = csv_writer(writer, &DECLARATION_HEADER)?;
    for declaration in declarations {
        csv.serialize(DeclarationRow {
            function: &declaration.name,
            arguments: declaration.arguments.to_string(),
            tested: flag(declaration.tested),
            skipped: flag(declaration.skipped),
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes one row per tested signature of every function: `function,args`.
pub fn write_tested_signatures<W: Write>(
    writer: W,
    coverage: &CoverageMap,
) -> Result<(), csv::Error> {
    let mut csv = csv_writer(writer, &AGGREGATE_HEADER)?;
    for (function, entry) in coverage {
        for signature in &entry.tested {
            csv.serialize(AggregateRow {
                function,
                args: signature.to_string(),
            })?;
        }
    }
    csv.flush()?;
    Ok(())
}

/// Writes the per-dialect report to `path`.
pub fn write_dialect_report(path: &Path, declarations: &[FunctionDeclaration]) -> CoverageResult<()> {
    let file = std::fs::File::create(path).map_err(|e| CoverageError::write(path, e))?;
    write_declarations(file, declarations).map_err(|source| CoverageError::Report {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the aggregate report of every tested signature to `path`.
pub fn write_aggregate_report(path: &Path, coverage: &CoverageMap) -> CoverageResult<()> {
    let file = std::fs::File::create(path).map_err(|e| CoverageError::write(path, e))?;
    write_tested_signatures(file, coverage).map_err(|source| CoverageError::Report {
        path: path.to_path_buf(),
        source,
    })
}
