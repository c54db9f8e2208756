// tabmask-core/src/sanitizer.rs
//! Applies a `PatternSet` to text values and lifts that over tables.
//!
//! Recognizers run one after another: each sees the text produced by the
//! previous one. Within a recognizer every leftmost, non-overlapping match is
//! replaced in a single pass. Cells are masked independently, so tables are
//! processed in parallel with rayon.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::debug;
use rayon::prelude::*;
use regex::Captures;
use std::borrow::Cow;
use std::sync::Arc;

use crate::redaction_match::{log_captured_match_debug, log_redaction_pass_debug, RedactionSummaryItem};
use crate::sanitizers::compiler::{builtin_pattern_set, PatternSet};
use crate::table::{CellValue, Column, Table};

/// Stateless masking engine over an immutable `PatternSet`.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    patterns: Arc<PatternSet>,
}

impl Sanitizer {
    pub fn new(patterns: Arc<PatternSet>) -> Self {
        Self { patterns }
    }

    /// A sanitizer over the built-in `FULL_NAME`, `EMAIL`, `PHONE_NUMBER` recognizers.
    pub fn builtin() -> Result<Self> {
        let patterns = builtin_pattern_set().context("Failed to compile built-in recognizers")?;
        Ok(Self::new(patterns))
    }

    pub fn pattern_set(&self) -> &PatternSet {
        &self.patterns
    }

    /// Masks a single text value. Returns `Cow::Borrowed` when nothing matched.
    pub fn mask_text<'t>(&self, input: &'t str) -> Cow<'t, str> {
        self.mask_text_counted(input, None)
    }

    /// Masks a cell. Non-text cells are handed back untouched.
    pub fn mask_value(&self, value: CellValue) -> CellValue {
        match value {
            CellValue::Text(text) => {
                let masked = match self.mask_text(&text) {
                    Cow::Owned(masked) => Some(masked),
                    Cow::Borrowed(_) => None,
                };
                CellValue::Text(masked.unwrap_or(text))
            }
            other => other,
        }
    }

    /// Produces a masked copy of `table` with the same columns, order and rows.
    pub fn mask_table(&self, table: &Table) -> Table {
        debug!(
            "Masking table with {} column(s) and {} row(s).",
            table.column_count(),
            table.row_count()
        );
        let columns = table
            .columns()
            .par_iter()
            .map(|column| Column {
                name: column.name.clone(),
                values: column
                    .values
                    .par_iter()
                    .map(|cell| self.mask_cell(cell, None))
                    .collect(),
            })
            .collect();
        Table::from_columns_unchecked(columns)
    }

    /// Like `mask_table`, also reporting how many substitutions each recognizer made.
    pub fn mask_table_with_summary(&self, table: &Table) -> (Table, Vec<RedactionSummaryItem>) {
        debug!(
            "Masking table with summary: {} column(s), {} row(s).",
            table.column_count(),
            table.row_count()
        );
        let width = self.patterns.len();
        let per_column: Vec<(Column, Vec<usize>)> = table
            .columns()
            .par_iter()
            .map(|column| {
                let cells: Vec<(CellValue, Vec<usize>)> = column
                    .values
                    .par_iter()
                    .map(|cell| {
                        let mut counts = vec![0; width];
                        let masked = self.mask_cell(cell, Some(counts.as_mut_slice()));
                        (masked, counts)
                    })
                    .collect();

                let mut totals = vec![0; width];
                let mut values = Vec::with_capacity(cells.len());
                for (masked, counts) in cells {
                    add_counts(&mut totals, &counts);
                    values.push(masked);
                }
                (Column { name: column.name.clone(), values }, totals)
            })
            .collect();

        let mut totals = vec![0; width];
        let mut columns = Vec::with_capacity(per_column.len());
        for (column, counts) in per_column {
            add_counts(&mut totals, &counts);
            columns.push(column);
        }

        (Table::from_columns_unchecked(columns), self.summarize(&totals))
    }

    /// Counts what `mask_table` would replace, discarding the masked table.
    pub fn analyze_table(&self, table: &Table) -> Vec<RedactionSummaryItem> {
        self.mask_table_with_summary(table).1
    }

    fn mask_cell(&self, cell: &CellValue, counts: Option<&mut [usize]>) -> CellValue {
        match cell {
            CellValue::Text(text) => CellValue::Text(self.mask_text_counted(text, counts).into_owned()),
            other => other.clone(),
        }
    }

    fn mask_text_counted<'t>(&self, input: &'t str, mut counts: Option<&mut [usize]>) -> Cow<'t, str> {
        let mut current = Cow::Borrowed(input);
        if input.is_empty() {
            return current;
        }

        for (index, recognizer) in self.patterns.iter().enumerate() {
            let mut hits = 0usize;
            let masked = match recognizer.regex.replace_all(&current, |caps: &Captures| {
                log_captured_match_debug(module_path!(), &recognizer.name, &caps[0]);
                let (replacement, substitutions) = recognizer.render(caps);
                hits += substitutions;
                replacement
            }) {
                Cow::Owned(masked) => Some(masked),
                Cow::Borrowed(_) => None,
            };
            if let Some(masked) = masked {
                current = Cow::Owned(masked);
            }

            if hits > 0 {
                log_redaction_pass_debug(module_path!(), &recognizer.name, hits, &recognizer.label);
                if let Some(counts) = counts.as_deref_mut() {
                    counts[index] += hits;
                }
            }
        }
        current
    }

    fn summarize(&self, totals: &[usize]) -> Vec<RedactionSummaryItem> {
        self.patterns
            .iter()
            .zip(totals)
            .filter(|(_, occurrences)| **occurrences > 0)
            .map(|(recognizer, &occurrences)| RedactionSummaryItem {
                rule_name: recognizer.name.clone(),
                label: recognizer.label.clone(),
                occurrences,
            })
            .collect()
    }
}

fn add_counts(totals: &mut [usize], counts: &[usize]) {
    for (total, count) in totals.iter_mut().zip(counts) {
        *total += count;
    }
}
