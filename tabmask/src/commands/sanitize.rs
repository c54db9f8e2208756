//! `tabmask sanitize`: load a table, mask it, write it back out.

use anyhow::Result;
use is_terminal::IsTerminal;
use log::{debug, error, info};
use std::io;
use std::path::PathBuf;

use tabmask_core::{RedactionSummaryItem, Sanitizer};

use crate::commands::{error_msg, info_msg, load_table_or_empty, success_msg, warn_msg};
use crate::io::write_table;
use crate::ui::redaction_summary;

/// Options for a single sanitize run.
#[derive(Debug, Clone)]
pub struct SanitizeOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub delimiter: u8,
    pub no_redaction_summary: bool,
    pub quiet: bool,
}

/// What a sanitize run ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizeOutcome {
    /// The input was missing, unreadable or had no rows; nothing was masked or written.
    NoData,
    /// The masked table was written.
    Written {
        rows: usize,
        summary: Vec<RedactionSummaryItem>,
    },
    /// Masking ran but the output could not be written.
    WriteFailed,
}

/// Runs ingress, masking and egress in order.
pub fn run_sanitize(sanitizer: &Sanitizer, opts: &SanitizeOptions) -> Result<SanitizeOutcome> {
    info!("Starting sanitize operation.");

    let table = load_table_or_empty(&opts.input, opts.delimiter);
    if table.is_empty() {
        info!("Input table is empty; skipping sanitization.");
        if !opts.quiet {
            info_msg("No data to sanitize.");
        }
        return Ok(SanitizeOutcome::NoData);
    }

    let (masked, summary) = sanitizer.mask_table_with_summary(&table);
    debug!(
        "Masked {} row(s) across {} column(s).",
        masked.row_count(),
        masked.column_count()
    );

    if opts.output.exists() && !opts.quiet {
        warn_msg(format!("Overwriting existing file: {}", opts.output.display()));
    }
    if let Err(e) = write_table(&masked, &opts.output, opts.delimiter) {
        error!("{}", e);
        error_msg(e.to_string());
        return Ok(SanitizeOutcome::WriteFailed);
    }

    if !opts.quiet {
        success_msg(format!(
            "Sanitized {} row(s) written to {}",
            masked.row_count(),
            opts.output.display()
        ));
    }
    handle_redaction_summary(&summary, opts)?;

    info!("Sanitize operation completed.");
    Ok(SanitizeOutcome::Written {
        rows: masked.row_count(),
        summary,
    })
}

fn handle_redaction_summary(summary: &[RedactionSummaryItem], opts: &SanitizeOptions) -> Result<()> {
    if !opts.no_redaction_summary && !opts.quiet {
        debug!("Displaying redaction summary.");
        let stderr_supports_color = io::stderr().is_terminal();
        redaction_summary::print_summary(summary, &mut io::stderr(), stderr_supports_color)?;
    }
    Ok(())
}
