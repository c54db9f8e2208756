//! Command implementations and shared stderr message helpers.

pub mod sanitize;
pub mod scan;

use is_terminal::IsTerminal;
use log::error;
use std::io;
use std::path::Path;

use tabmask_core::Table;

use crate::io::{read_table, TableReadError};
use crate::ui::output_format;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Helper for printing success messages to stderr.
pub fn success_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Loads the input table. Any load failure is reported and replaced by an empty
/// table, so callers only need to handle the empty case.
pub fn load_table_or_empty(path: &Path, delimiter: u8) -> Table {
    match read_table(path, delimiter) {
        Ok(table) => table,
        Err(e) => {
            report_load_failure(&e);
            Table::empty()
        }
    }
}

/// Reports an ingress failure on stderr and in the log.
pub fn report_load_failure(e: &TableReadError) {
    error!("Failed to load input table: {}", e);
    error_msg(e.to_string());
}
