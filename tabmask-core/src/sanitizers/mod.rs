//! Recognizer compilation for tabmask.
//!
//! Turns the recognizer catalogue from `config` into a compiled, ordered
//! `PatternSet` that the `Sanitizer` applies to text and tables.

pub mod compiler;
