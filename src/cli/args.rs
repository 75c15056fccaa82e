//! Defines the command-line arguments and subcommands for the dialect-coverage CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "dialect-coverage",
    version,
    about = "Reports which dialect functions are exercised by expression test setup files."
)]
pub struct CoverageArgs {
    /// YAML file overriding file naming and exclusion conventions.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log pipeline progress at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Directories shared by the checking commands.
#[derive(Debug, Args)]
pub struct CheckDirs {
    /// Directory holding `<dialect>.ini` exclusion files.
    #[arg(long, value_name = "DIR")]
    pub ini_dir: PathBuf,

    /// Root of the expression test tree holding `setup*.txt` files.
    #[arg(long, value_name = "DIR")]
    pub setup_dir: PathBuf,

    /// Where reports are written.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check one dialect definition file and write `<dialect>.csv`.
    Check {
        /// The path to the `*Dialect.cpp` file.
        #[arg(required = true)]
        dialect_file: PathBuf,
        #[command(flatten)]
        dirs: CheckDirs,
    },
    /// Find dialect definition files under a directory and check each one.
    CheckAll {
        /// The directory to search for `*Dialect.cpp` files.
        #[arg(required = true)]
        dialect_dir: PathBuf,
        #[command(flatten)]
        dirs: CheckDirs,
        /// Stop after the first dialect file found.
        #[arg(long)]
        first_only: bool,
    },
    /// List every tested function signature in a setup tree.
    Extract {
        /// Root of the expression test tree.
        #[arg(required = true)]
        setup_dir: PathBuf,
        /// Where the report is written.
        #[arg(long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,
    },
}
