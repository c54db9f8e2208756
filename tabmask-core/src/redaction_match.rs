// tabmask-core/src/redaction_match.rs
//! Redaction reporting types and PII-safe debug logging helpers.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Whether original matched content may appear in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("TABMASK_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Number of substitutions a single recognizer performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSummaryItem {
    pub rule_name: String,
    pub label: String,
    pub occurrences: usize,
}

/// Total occurrences across a summary.
pub fn total_occurrences(summary: &[RedactionSummaryItem]) -> usize {
    summary.iter().map(|item| item.occurrences).sum()
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_captured_match_debug(module_path: &str, rule_name: &str, original_sensitive_content: &str) {
    debug!(
        "{} Captured match for rule '{}' (original): '{}'",
        module_path,
        rule_name,
        get_loggable_content(original_sensitive_content)
    );
}

pub fn log_redaction_pass_debug(module_path: &str, rule_name: &str, occurrences: usize, label: &str) {
    debug!(
        "{} Rule '{}' replaced {} occurrence(s) with '{}'",
        module_path, rule_name, occurrences, label
    );
}
