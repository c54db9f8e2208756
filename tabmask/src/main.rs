// tabmask/src/main.rs
//! tabmask entry point.
//!
//! Parses the command line, initialises logging and the built-in sanitizer, and
//! dispatches to the requested command.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tabmask::cli::{Cli, Commands};
use tabmask::commands::sanitize::{run_sanitize, SanitizeOptions};
use tabmask::commands::scan::{run_scan, ScanOptions};
use tabmask::logger;
use tabmask_core::Sanitizer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.log_level_override());
    info!("tabmask started. Version: {}", env!("CARGO_PKG_VERSION"));

    let sanitizer = Sanitizer::builtin().context("Failed to initialise the sanitizer")?;

    match cli.command {
        Commands::Sanitize(cmd) => {
            let opts = SanitizeOptions {
                input: cmd.input_file,
                output: cmd.output,
                delimiter: cmd.delimiter,
                no_redaction_summary: cmd.no_summary,
                quiet: cli.quiet,
            };
            run_sanitize(&sanitizer, &opts).context("Sanitize command failed")?;
        }
        Commands::Scan(cmd) => {
            let opts = ScanOptions {
                input: cmd.input_file,
                delimiter: cmd.delimiter,
                fail_over_threshold: cmd.fail_over_threshold,
                json_stdout: cmd.json_stdout,
                quiet: cli.quiet,
            };
            run_scan(&sanitizer, &opts).context("Scan command failed")?;
        }
    }

    Ok(())
}
