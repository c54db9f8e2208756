//! Formatting of operator-facing messages written to stderr.

use owo_colors::OwoColorize;
use std::io::{self, Write};

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{}", msg.cyan())
    } else {
        writeln!(writer, "{}", msg)
    }
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{}", msg.green())
    } else {
        writeln!(writer, "{}", msg)
    }
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{} {}", "Warning:".yellow().bold(), msg.yellow())
    } else {
        writeln!(writer, "Warning: {}", msg)
    }
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{} {}", "Error:".red().bold(), msg.red())
    } else {
        writeln!(writer, "Error: {}", msg)
    }
}
