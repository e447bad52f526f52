//! ui::output
//!
//! Writing results and diagnostics.
//!
//! # Design
//!
//! Rendered output goes to stdout unchanged. Everything meant for the user
//! but not part of the result (errors, usage text) goes to stderr.

use std::fmt::Display;
use std::io::{self, Write};

/// Write rendered output to stdout as-is.
pub fn print(rendered: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print plugin usage text.
pub fn usage(message: impl Display) {
    eprintln!("{}", message);
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}
