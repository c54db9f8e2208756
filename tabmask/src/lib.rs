// tabmask/src/lib.rs
//! # tabmask CLI
//!
//! Command-line front end for `tabmask-core`: reads a delimited file into a table,
//! masks it, and writes the sanitized copy.

pub mod cli;
pub mod commands;
pub mod io;
pub mod logger;
pub mod ui;

pub use commands::sanitize::{run_sanitize, SanitizeOptions, SanitizeOutcome};
pub use commands::scan::{run_scan, ScanOptions};
