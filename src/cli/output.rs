//! Handles all user-facing output for the CLI.
//!
//! Status lines go to stdout, colorized when the terminal supports it.
//! Unreadable setup files are listed in red on stderr. Diagnostics and log
//! events also go to stderr and are handled elsewhere.

use std::io;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::errors::ScanErrors;

/// Prints a pipeline status line; notices about missing input are yellow.
pub fn print_status(status: &str) {
    let color = if is_notice(status) {
        Color::Yellow
    } else {
        Color::Green
    };
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    println!("{status}");
    let _ = stdout.reset();
}

/// Lists setup files that could not be read, one `path: message` per line.
pub fn print_scan_errors(errors: &ScanErrors) {
    if errors.is_empty() {
        return;
    }
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = write_scan_errors(&mut stderr, errors);
}

pub fn write_scan_errors<W: WriteColor>(out: &mut W, errors: &ScanErrors) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
    for (path, message) in errors {
        writeln!(out, "{}: {message}", path.display())?;
    }
    out.reset()
}

fn is_notice(status: &str) -> bool {
    status.starts_with("No ")
}
