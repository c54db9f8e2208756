//! compiler.rs - Compiles recognizer definitions into a `PatternSet`.
//!
//! Every pattern is built with the `regex` crate, which matches in time linear
//! in the input, and with an explicit compiled-size limit. The built-in set is
//! compiled once per process and shared through an `Arc`.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use log::debug;
use once_cell::sync::OnceCell;
use regex::{Captures, Regex, RegexBuilder};
use std::slice;
use std::sync::Arc;

use crate::config::{RecognizerConfig, RecognizerRule, MAX_PATTERN_LENGTH};
use crate::errors::TabmaskError;

/// Upper bound on the compiled program size of a single recognizer.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A compiled recognizer: a matcher, the label it stands for, and the
/// replacement template applied to each match.
#[derive(Debug)]
pub struct Recognizer {
    /// The unique name of the recognizer rule.
    pub name: String,
    /// Category label, e.g. `EMAIL`.
    pub label: String,
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// Replacement template; expands to the label.
    pub replace_with: String,
    /// Words per replaced group for run-shaped recognizers (see `render`).
    pub word_group_size: Option<usize>,
}

impl Recognizer {
    /// Builds the replacement for one match and returns it with the number of
    /// substitutions it contains.
    ///
    /// Without a word group size the whole match becomes one expansion of the
    /// template. With one, the match is split on spaces and each group of that
    /// many words, counted from the end, becomes one expansion; leading words
    /// that do not fill a group are written back as they were.
    pub fn render(&self, caps: &Captures<'_>) -> (String, usize) {
        let mut dst = String::new();
        let Some(size) = self.word_group_size.filter(|&size| size > 0) else {
            caps.expand(&self.replace_with, &mut dst);
            return (dst, 1);
        };

        let words: Vec<&str> = caps[0].split(' ').collect();
        let groups = words.len() / size;
        if groups == 0 {
            return (caps[0].to_string(), 0);
        }
        for word in &words[..words.len() % size] {
            dst.push_str(word);
            dst.push(' ');
        }
        for group in 0..groups {
            if group > 0 {
                dst.push(' ');
            }
            caps.expand(&self.replace_with, &mut dst);
        }
        (dst, groups)
    }
}

/// The ordered, immutable collection of recognizers.
#[derive(Debug)]
pub struct PatternSet {
    recognizers: Vec<Recognizer>,
}

impl PatternSet {
    /// Iterates recognizers in application order.
    pub fn iter(&self) -> slice::Iter<'_, Recognizer> {
        self.recognizers.iter()
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// Recognizer names in application order.
    pub fn names(&self) -> Vec<&str> {
        self.recognizers.iter().map(|r| r.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Recognizer;
    type IntoIter = slice::Iter<'a, Recognizer>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

static BUILTIN_PATTERN_SET: OnceCell<Arc<PatternSet>> = OnceCell::new();

/// Compiles a list of `RecognizerRule`s, preserving their order.
pub fn compile_rules(rules_to_compile: Vec<RecognizerRule>) -> Result<PatternSet, TabmaskError> {
    debug!("Starting compilation of {} recognizers.", rules_to_compile.len());

    let mut recognizers = Vec::with_capacity(rules_to_compile.len());
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(TabmaskError::PatternLengthExceeded(
                rule.name,
                rule.pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(&rule.pattern)
            .size_limit(REGEX_SIZE_LIMIT)
            .dfa_size_limit(REGEX_SIZE_LIMIT)
            .build();

        match regex_result {
            Ok(regex) => {
                log::debug!(
                    target: "tabmask_core::sanitizer",
                    "Recognizer '{}' compiled successfully.",
                    &rule.name
                );
                let replace_with = rule.replacement().to_string();
                recognizers.push(Recognizer {
                    name: rule.name,
                    label: rule.label,
                    regex,
                    replace_with,
                    word_group_size: rule.word_group_size,
                });
            }
            Err(e) => {
                compilation_errors.push(TabmaskError::RuleCompilationError(rule.name, e));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(TabmaskError::Fatal(format!(
            "Failed to compile {} recognizer(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!("Finished compiling recognizers. Total compiled: {}.", recognizers.len());
        Ok(PatternSet { recognizers })
    }
}

/// Returns the shared built-in `PatternSet`, compiling it on first use.
pub fn builtin_pattern_set() -> Result<Arc<PatternSet>> {
    let set = BUILTIN_PATTERN_SET.get_or_try_init(|| -> Result<Arc<PatternSet>> {
        debug!("Built-in pattern set not yet compiled. Compiling now.");
        let config = RecognizerConfig::load_builtin()?;
        Ok(Arc::new(compile_rules(config.rules)?))
    })?;
    Ok(Arc::clone(set))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, pattern: &str) -> RecognizerRule {
        RecognizerRule {
            name: name.to_string(),
            label: name.to_uppercase(),
            pattern: pattern.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn compile_preserves_order() {
        let set = compile_rules(vec![rule("b", "b"), rule("a", "a")]).unwrap();
        assert_eq!(set.names(), vec!["b", "a"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn compile_rejects_overlong_pattern() {
        let long = "a".repeat(MAX_PATTERN_LENGTH + 1);
        let err = compile_rules(vec![rule("long", &long)]).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum allowed"));
    }

    #[test]
    fn compile_collects_every_error() {
        let err = compile_rules(vec![rule("x", "("), rule("y", "[")]).unwrap_err();
        assert!(err.to_string().contains("Failed to compile 2 recognizer(s)"));
    }

    fn render_all(recognizer: &Recognizer, text: &str) -> Vec<(String, usize)> {
        recognizer
            .regex
            .captures_iter(text)
            .map(|caps| recognizer.render(&caps))
            .collect()
    }

    #[test]
    fn render_expands_whole_match_without_word_groups() {
        let set = compile_rules(vec![rule("digits", r"\d+")]).unwrap();
        let recognizer = set.iter().next().unwrap();
        assert_eq!(
            render_all(recognizer, "a 12 b 345"),
            vec![("DIGITS".to_string(), 1), ("DIGITS".to_string(), 1)]
        );
    }

    #[test]
    fn render_masks_word_runs_pair_by_pair() {
        let mut words = rule("words", r"[a-z]+(?: [a-z]+)*");
        words.word_group_size = Some(2);
        let set = compile_rules(vec![words]).unwrap();
        let recognizer = set.iter().next().unwrap();

        assert_eq!(render_all(recognizer, "ab cd"), vec![("WORDS".to_string(), 1)]);
        assert_eq!(render_all(recognizer, "ab cd ef"), vec![("ab WORDS".to_string(), 1)]);
        assert_eq!(
            render_all(recognizer, "ab cd ef gh"),
            vec![("WORDS WORDS".to_string(), 2)]
        );
        assert_eq!(render_all(recognizer, "ab"), vec![("ab".to_string(), 0)]);
    }

    #[test]
    fn builtin_set_is_shared() {
        let a = builtin_pattern_set().unwrap();
        let b = builtin_pattern_set().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.names(), vec!["full_name", "email", "phone_number"]);
    }
}
