//! The dialect-coverage Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Command, CoverageArgs};
use crate::config::CoverageConfig;
use crate::discovery::DialectSelection;
use crate::engine::{print_error, CoveragePipeline, RunOutcome};
use crate::errors::CoverageResult;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = CoverageArgs::parse();
    init_tracing(args.verbose);

    if let Err(e) = dispatch(args) {
        print_error(e);
        process::exit(1);
    }
}

fn dispatch(args: CoverageArgs) -> CoverageResult<()> {
    let config = CoverageConfig::load(args.config.as_deref())?;
    let pipeline = CoveragePipeline::new(config);

    match args.command {
        Command::Check { dialect_file, dirs } => {
            let outcome = pipeline.check_dialect(
                &dialect_file,
                &dirs.ini_dir,
                &dirs.setup_dir,
                &dirs.output_dir,
            )?;
            print_outcome(&outcome);
        }
        Command::CheckAll {
            dialect_dir,
            dirs,
            first_only,
        } => {
            let selection = if first_only {
                DialectSelection::First
            } else {
                DialectSelection::All
            };
            let checks = pipeline.check_all(
                &dialect_dir,
                selection,
                &dirs.ini_dir,
                &dirs.setup_dir,
                &dirs.output_dir,
            )?;
            if checks.is_empty() {
                output::print_status(&format!(
                    "No dialect files found in {}",
                    dialect_dir.display()
                ));
            }
            let mut failed = false;
            for check in checks {
                match check.outcome {
                    Ok(outcome) => print_outcome(&outcome),
                    Err(e) => {
                        failed = true;
                        print_error(e);
                    }
                }
            }
            if failed {
                process::exit(1);
            }
        }
        Command::Extract {
            setup_dir,
            output_dir,
        } => {
            let outcome = pipeline.extract_all_test_cases(&setup_dir, &output_dir)?;
            print_outcome(&outcome);
        }
    }
    Ok(())
}

fn print_outcome(outcome: &RunOutcome) {
    output::print_scan_errors(&outcome.scan_errors);
    output::print_status(&outcome.status);
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
