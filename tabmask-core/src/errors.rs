//! errors.rs - Custom error types for the tabmask-core library.
//!
//! Masking itself is total and never fails; these variants cover building the
//! recognizer set and constructing tables.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `tabmask-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TabmaskError {
    #[error("Failed to compile recognizer '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Recognizer '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Column '{column}' has {found} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
