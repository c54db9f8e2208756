//! `tabmask scan`: report what would be masked without writing anything.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::info;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

use tabmask_core::{total_occurrences, RedactionSummaryItem, Sanitizer, Table};

use crate::commands::{info_msg, report_load_failure};
use crate::io::{read_table, TableReadError};
use crate::ui::redaction_summary;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub input: PathBuf,
    pub delimiter: u8,
    pub fail_over_threshold: Option<usize>,
    pub json_stdout: bool,
    pub quiet: bool,
}

/// JSON shape written by `--json-stdout`.
#[derive(Debug, Serialize)]
pub struct ScanReport<'a> {
    pub source: String,
    pub rows: usize,
    pub total_occurrences: usize,
    pub rules: &'a [RedactionSummaryItem],
}

/// Scans the input and returns the per-recognizer summary. Fails when the total
/// exceeds `fail_over_threshold`.
///
/// An unreadable input is reported and scanned as an empty table, except when a
/// threshold is set: a missing, malformed or unreadable file then fails the scan
/// so a gate never passes on data it could not see. A zero-length file is
/// simply empty.
pub fn run_scan(sanitizer: &Sanitizer, opts: &ScanOptions) -> Result<Vec<RedactionSummaryItem>> {
    info!("Starting scan operation.");

    let table = match read_table(&opts.input, opts.delimiter) {
        Ok(table) => table,
        Err(e @ TableReadError::SourceEmpty(_)) => {
            report_load_failure(&e);
            Table::empty()
        }
        Err(e) if opts.fail_over_threshold.is_some() => {
            report_load_failure(&e);
            return Err(e).context("Cannot enforce --fail-over-threshold on an unreadable input");
        }
        Err(e) => {
            report_load_failure(&e);
            Table::empty()
        }
    };
    let summary = if table.is_empty() {
        if !opts.quiet {
            info_msg("No data to scan.");
        }
        Vec::new()
    } else {
        sanitizer.analyze_table(&table)
    };
    let total = total_occurrences(&summary);

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if opts.json_stdout {
        let report = ScanReport {
            source: opts.input.display().to_string(),
            rows: table.row_count(),
            total_occurrences: total,
            rules: &summary,
        };
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize scan report")?;
        writeln!(writer, "{}", json)?;
    } else {
        let supports_color = stdout.is_terminal();
        redaction_summary::print_summary(&summary, &mut writer, supports_color)?;
    }

    if let Some(threshold) = opts.fail_over_threshold {
        if total > threshold {
            bail!(
                "Detected {} sensitive item(s), exceeding the threshold of {}.",
                total,
                threshold
            );
        }
    }

    info!("Scan operation completed.");
    Ok(summary)
}
