//! Extraction of function registrations from dialect definition files.
//!
//! A dialect file registers its supported functions with calls shaped like
//!
//! ```text
//! AddFunction2(Expression::DATEADD, T_STR, T_DATE);
//! AddFunctionInt3(Expression::BITAND);
//! AddFunctionAgg(TS("SUM"), T_REAL, true);
//! ```
//!
//! Registrations are found with a single pattern that tolerates arbitrary
//! whitespace and line breaks up to the closing `);`.

use std::path::Path;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::debug;

use crate::discovery::read_latin1;
use crate::errors::{CoverageError, CoverageResult};
use crate::signature::Signature;

lazy_static! {
    /// Groups: type class, arity, function name. Group 0 is the whole registration.
    static ref REGISTRATION: Regex = Regex::new(
        r#"(?s)AddFunction(Agg|Real|Int)?([1234])?\(\s*(?:Expression::|TS)\(?"?(\w+)"?\)?.*?\);"#
    )
    .unwrap();
}

/// Text preceding this marker in a dialect file name is the dialect's name.
const DIALECT_NAME_MARKER: &str = "Dialect";

/// Field prefixes naming an argument type constant, longest first.
const TYPE_PREFIXES: [&str; 2] = ["Type_", "T_"];

/// A function registered by a dialect, plus the coverage verdict for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub arguments: Signature,
    pub tested: bool,
    pub skipped: bool,
}

impl FunctionDeclaration {
    pub fn new(name: impl Into<String>, arguments: Signature) -> Self {
        Self {
            name: name.into(),
            arguments,
            tested: false,
            skipped: false,
        }
    }
}

/// Derives the dialect name from a definition file path:
/// `MySQLDialect.cpp` becomes `mysql`.
pub fn dialect_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    file_name
        .split(DIALECT_NAME_MARKER)
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Reads and parses one dialect definition file.
pub fn parse_dialect_file(path: &Path) -> CoverageResult<Vec<FunctionDeclaration>> {
    let source = read_latin1(path).map_err(|e| CoverageError::read(path, e))?;
    let declarations = parse_dialect_source(&source);
    debug!(
        path = %path.display(),
        count = declarations.len(),
        "parsed dialect registrations"
    );
    Ok(declarations)
}

/// Extracts every registration in `source`, in source order.
pub fn parse_dialect_source(source: &str) -> Vec<FunctionDeclaration> {
    REGISTRATION
        .captures_iter(source)
        .map(|caps| {
            let name = &caps[3];
            FunctionDeclaration::new(name, registration_signature(&caps))
        })
        .collect()
}

fn registration_signature(caps: &Captures<'_>) -> Signature {
    let registration = &caps[0];
    let type_class = caps.get(1).map(|m| m.as_str());
    let arity = caps.get(2).and_then(|m| m.as_str().parse::<usize>().ok());

    match (type_class, arity) {
        (Some(class @ ("Real" | "Int")), Some(arity)) => {
            Signature::repeated(&class.to_lowercase(), arity)
        }
        (_, Some(arity)) => trailing_fields(registration, arity),
        (Some("Agg"), None) => trailing_fields(registration, 1),
        _ => Signature::Unknown,
    }
}

/// Takes the last `count` argument fields of a registration as its signature.
///
/// A final field containing `true` is a registration flag, not an argument,
/// and is skipped. The leading field (which carries the function name) is
/// never treated as an argument.
fn trailing_fields(registration: &str, count: usize) -> Signature {
    let mut fields: Vec<&str> = registration.split(',').skip(1).collect();
    if fields.last().is_some_and(|last| last.contains("true")) {
        fields.pop();
    }
    let start = fields.len().saturating_sub(count);
    Signature::of(fields[start..].iter().map(|field| clean_field(field)))
}

fn clean_field(field: &str) -> String {
    let trimmed = field.trim_matches(|c: char| c.is_whitespace() || c == ';' || c == ')');
    let bare = TYPE_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed);
    bare.to_lowercase()
}
