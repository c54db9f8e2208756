// tabmask-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot masking with the built-in recognizers.

use anyhow::Result;

use crate::sanitizer::Sanitizer;
use crate::table::Table;

/// Masks a single string with the built-in recognizers.
pub fn headless_mask_string(content: &str) -> Result<String> {
    let sanitizer = Sanitizer::builtin()?;
    Ok(sanitizer.mask_text(content).into_owned())
}

/// Masks every text cell of `table` with the built-in recognizers.
pub fn headless_mask_table(table: &Table) -> Result<Table> {
    let sanitizer = Sanitizer::builtin()?;
    Ok(sanitizer.mask_table(table))
}
