//! Renders the per-recognizer redaction summary.

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table as SummaryTable};
use std::io::{self, Write};

use tabmask_core::{total_occurrences, RedactionSummaryItem};

/// Prints `summary` as a table, or a single line when nothing was found.
pub fn print_summary<W: Write>(
    summary: &[RedactionSummaryItem],
    writer: &mut W,
    enable_colors: bool,
) -> io::Result<()> {
    if summary.is_empty() {
        return writeln!(writer, "No sensitive data found.");
    }

    let mut table = SummaryTable::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rule", "Label", "Occurrences"]);
    if !enable_colors {
        table.force_no_tty();
    }

    for item in summary {
        table.add_row(vec![
            Cell::new(&item.rule_name),
            Cell::new(&item.label),
            Cell::new(item.occurrences).set_alignment(CellAlignment::Right),
        ]);
    }

    writeln!(writer, "Redaction Summary:")?;
    writeln!(writer, "{table}")?;
    writeln!(writer, "Total: {}", total_occurrences(summary))
}
