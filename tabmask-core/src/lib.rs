// tabmask-core/src/lib.rs
//! # tabmask Core Library
//!
//! `tabmask-core` holds the pattern-based detection-and-masking engine used by the
//! `tabmask` CLI. It replaces person names, email addresses and phone numbers with the
//! fixed labels `FULL_NAME`, `EMAIL` and `PHONE_NUMBER`, in single text values and across
//! every text cell of an in-memory table.
//!
//! The library performs no I/O. Reading and writing delimited files is left to the caller.
//!
//! ## Modules
//!
//! * `config`: The embedded, ordered recognizer catalogue.
//! * `sanitizers`: Compiles the catalogue into a `PatternSet`.
//! * `sanitizer`: The `Sanitizer` that applies a `PatternSet` to text and tables.
//! * `table`: `Table`, `Column` and `CellValue`.
//! * `redaction_match`: Per-recognizer summary items and PII-safe debug logging.
//! * `headless`: One-shot convenience wrappers.
//! * `errors`: The `TabmaskError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use tabmask_core::{Sanitizer, Table, Column, CellValue};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let sanitizer = Sanitizer::builtin()?;
//!
//!     let text = sanitizer.mask_text("Contact John Smith at john.smith@example.com or 555-123-4567.");
//!     assert_eq!(text, "Contact FULL_NAME at EMAIL or PHONE_NUMBER.");
//!
//!     let table = Table::from_columns(vec![
//!         Column::new("notes", vec!["Jane Doe lives here".into(), CellValue::Integer(42)]),
//!     ])?;
//!     let masked = sanitizer.mask_table(&table);
//!     assert_eq!(masked.column("notes").unwrap().values[1], CellValue::Integer(42));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Masking is total: it never fails, and non-text cells pass through untouched.
//! Building the recognizer set and constructing tables return `TabmaskError`;
//! convenience constructors return `anyhow::Result`.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod errors;
pub mod headless;
pub mod redaction_match;
pub mod sanitizer;
pub mod sanitizers;
pub mod table;

/// Re-exports the recognizer catalogue types.
pub use config::{RecognizerConfig, RecognizerRule, MAX_PATTERN_LENGTH};

/// Re-exports the custom error type for clear error reporting.
pub use errors::TabmaskError;

/// Re-exports the masking engine.
pub use sanitizer::Sanitizer;

/// Re-exports the compiled recognizer types.
pub use sanitizers::compiler::{builtin_pattern_set, compile_rules, PatternSet, Recognizer};

/// Re-exports the tabular model.
pub use table::{CellValue, Column, Table};

/// Re-exports reporting types.
pub use redaction_match::{redact_sensitive, total_occurrences, RedactionSummaryItem};

/// Re-exports one-shot helpers.
pub use headless::{headless_mask_string, headless_mask_table};
