//! This file defines the command-line interface (CLI) for the tabmask application,
//! including all available commands and their arguments.

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "tabmask",
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = "Mask names, emails and phone numbers in delimited data files",
    long_about = "tabmask reads a delimited file with a header row, replaces person names, email addresses and phone numbers in every text cell with the labels FULL_NAME, EMAIL and PHONE_NUMBER, and writes a sanitized copy. Non-text cells (numbers, booleans, empty fields) are copied unchanged.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Explicitly disable debug logging, even if RUST_LOG is set to DEBUG
    #[arg(long = "disable-debug", global = true, help = "Disable debug logging, overriding RUST_LOG.")]
    pub disable_debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level implied by the flags, or `None` to defer to `RUST_LOG`.
    pub fn log_level_override(&self) -> Option<LevelFilter> {
        if self.quiet {
            Some(LevelFilter::Error)
        } else if self.disable_debug {
            Some(LevelFilter::Info)
        } else if self.debug {
            Some(LevelFilter::Debug)
        } else {
            None
        }
    }
}

/// All available commands for the `tabmask` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Masks every text cell of the input file and writes the result.
    #[command(about = "Masks every text cell of the input file and writes the result.")]
    Sanitize(SanitizeCommand),

    /// Counts what would be masked without writing any output.
    #[command(about = "Counts what would be masked without writing any output.")]
    Scan(ScanCommand),
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to the delimited input file.
    #[arg(long, short = 'i', value_name = "FILE", help = "Delimited input file with a header row.")]
    pub input_file: PathBuf,

    /// Path the sanitized copy is written to.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write the sanitized copy to this file.")]
    pub output: PathBuf,

    /// Field delimiter for both input and output.
    #[arg(
        long,
        value_name = "CHAR",
        default_value = ",",
        env = "TABMASK_DELIMITER",
        value_parser = parse_delimiter,
        help = "Field delimiter (single ASCII character, or 'tab')."
    )]
    pub delimiter: u8,

    /// Suppress the redaction summary.
    #[arg(long = "no-redaction-summary", help = "Suppress the redaction summary.")]
    pub no_summary: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Path to the delimited input file.
    #[arg(long, short = 'i', value_name = "FILE", help = "Delimited input file with a header row.")]
    pub input_file: PathBuf,

    /// Field delimiter.
    #[arg(
        long,
        value_name = "CHAR",
        default_value = ",",
        env = "TABMASK_DELIMITER",
        value_parser = parse_delimiter,
        help = "Field delimiter (single ASCII character, or 'tab')."
    )]
    pub delimiter: u8,

    /// Exit with a non-zero code if the total number of detected items exceeds this threshold.
    #[arg(long = "fail-over-threshold", value_name = "N", help = "Exit with a non-zero code if the total number of detected items exceeds this threshold.")]
    pub fail_over_threshold: Option<usize>,

    /// Print the scan summary as JSON to stdout.
    #[arg(long = "json-stdout", help = "Print the scan summary to stdout as JSON.")]
    pub json_stdout: bool,
}

/// Parses a delimiter argument into a single byte.
pub fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let bytes = s.as_bytes();
            if bytes.len() == 1 && bytes[0].is_ascii() && bytes[0] != b'"' && bytes[0] != b'\n' {
                Ok(bytes[0])
            } else {
                Err(format!("invalid delimiter '{}': expected a single ASCII character or 'tab'", s))
            }
        }
    }
}
