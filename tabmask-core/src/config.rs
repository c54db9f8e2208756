//! Recognizer catalogue for `tabmask-core`.
//!
//! The catalogue is a fixed, ordered list of recognizer definitions embedded in the
//! library as YAML. This module deserializes and validates it; compilation into
//! matchers lives in `sanitizers::compiler`.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum allowed length for a recognizer pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// A single recognizer definition: what to look for and what to write instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RecognizerRule {
    /// Unique identifier for the rule (e.g., "email").
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// Category tag written in place of a match (e.g., "EMAIL").
    pub label: String,
    /// The regex pattern string.
    pub pattern: String,
    /// Replacement template. Falls back to `label` when absent.
    /// May reference named capture groups of `pattern` (e.g. `${kind}_ID`).
    pub replace_with: Option<String>,
    /// When set, a match is a run of space-separated words that is replaced in
    /// groups of this many words, counted from the end of the run. Leftover
    /// leading words are kept.
    pub word_group_size: Option<usize>,
}

impl Default for RecognizerRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            label: String::new(),
            pattern: String::new(),
            replace_with: None,
            word_group_size: None,
        }
    }
}

impl RecognizerRule {
    /// The replacement template actually applied for this rule.
    pub fn replacement(&self) -> &str {
        self.replace_with.as_deref().unwrap_or(&self.label)
    }
}

/// The ordered recognizer catalogue.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct RecognizerConfig {
    pub rules: Vec<RecognizerRule>,
}

impl RecognizerConfig {
    /// Loads the built-in catalogue from the embedded configuration.
    pub fn load_builtin() -> Result<Self> {
        debug!("Loading built-in recognizers from embedded string...");
        let yaml = include_str!("../config/default_recognizers.yaml");
        let config = Self::parse(yaml).context("Failed to parse built-in recognizers")?;
        debug!("Loaded {} built-in recognizers.", config.rules.len());
        Ok(config)
    }

    fn parse(yaml: &str) -> Result<Self> {
        let config: RecognizerConfig = serde_yml::from_str(yaml)?;
        validate_rules(&config.rules)?;
        Ok(config)
    }

    /// Rule names in application order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }
}

/// Validates rule integrity: unique names, labels present, patterns compile,
/// and named groups referenced by the replacement exist.
fn validate_rules(rules: &[RecognizerRule]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();
    let group_ref_regex = Regex::new(r"\$\{?([A-Za-z_][A-Za-z0-9_]*)\}?")?;

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.clone()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        if rule.label.is_empty() {
            errors.push(format!("Rule '{}' has an empty `label` field.", rule.name));
        }

        if rule.word_group_size == Some(0) {
            errors.push(format!("Rule '{}' has a zero `word_group_size`.", rule.name));
        }

        if rule.pattern.is_empty() {
            errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
            continue;
        }

        let compiled = match Regex::new(&rule.pattern) {
            Ok(re) => re,
            Err(e) => {
                errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
                continue;
            }
        };

        let group_names: HashSet<&str> = compiled.capture_names().flatten().collect();
        for cap in group_ref_regex.captures_iter(rule.replacement()) {
            if let Some(group) = cap.get(1) {
                if !group_names.contains(group.as_str()) {
                    errors.push(format!(
                        "Rule '{}': replacement references non-existent capture group '{}'.",
                        rule.name,
                        group.as_str()
                    ));
                }
            }
        }
    }

    if !errors.is_empty() {
        Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalogue_is_ordered() {
        let config = RecognizerConfig::load_builtin().unwrap();
        assert_eq!(config.rule_names(), vec!["full_name", "email", "phone_number"]);
        let labels: Vec<&str> = config.rules.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["FULL_NAME", "EMAIL", "PHONE_NUMBER"]);
    }

    #[test]
    fn replacement_defaults_to_label() {
        let config = RecognizerConfig::load_builtin().unwrap();
        assert_eq!(config.rules[1].replacement(), "EMAIL");
        assert_eq!(config.rules[0].replacement(), "FULL_NAME");
        assert_eq!(config.rules[0].word_group_size, Some(2));
        assert_eq!(config.rules[1].word_group_size, None);
    }

    #[test]
    fn rejects_zero_word_group_size() {
        let yaml = r#"
rules:
  - name: words
    label: W
    pattern: '[a-z]+'
    word_group_size: 0
"#;
        let err = RecognizerConfig::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("zero `word_group_size`"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let yaml = r#"
rules:
  - name: a
    label: A
    pattern: 'a'
  - name: a
    label: B
    pattern: 'b'
"#;
        let err = RecognizerConfig::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("Duplicate rule name found: 'a'"));
    }

    #[test]
    fn rejects_unknown_group_in_replacement() {
        let yaml = r#"
rules:
  - name: a
    label: A
    pattern: '(?P<x>a)'
    replace_with: '${y}A'
"#;
        let err = RecognizerConfig::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("non-existent capture group 'y'"));
    }

    #[test]
    fn rejects_invalid_pattern_and_missing_label() {
        let yaml = r#"
rules:
  - name: broken
    pattern: '(unclosed'
"#;
        let err = RecognizerConfig::parse(yaml).unwrap_err().to_string();
        assert!(err.contains("empty `label`"));
        assert!(err.contains("invalid regex pattern"));
    }
}
