//! render::text
//!
//! Measuring the visible width of styled text.
//!
//! Two kinds of invisible markup appear in rendered output: `%{name}` style
//! placeholders in ASCII art, and the `ESC [ params m` sequences they expand
//! to. Both are stripped before counting characters.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a `%{name}` style placeholder; group 1 is the name.
pub(crate) static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%\{(\w+)\}").expect("placeholder regex should compile"));

/// Matches an SGR escape sequence.
static ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("escape regex should compile"));

/// Remove every match of `re`.
///
/// Removing a match can join its neighbours into a new one, so this repeats
/// until nothing matches.
fn strip_all(re: &Regex, text: &str) -> String {
    let mut current = text.to_string();
    while re.is_match(&current) {
        current = re.replace_all(&current, "").into_owned();
    }
    current
}

/// Remove `%{name}` style placeholders.
pub fn strip_style_placeholders(text: &str) -> String {
    strip_all(&PLACEHOLDER_RE, text)
}

/// Remove terminal SGR escape sequences.
pub fn strip_terminal_escapes(text: &str) -> String {
    strip_all(&ESCAPE_RE, text)
}

/// Number of characters in `text` after stripping style placeholders and
/// escape sequences.
///
/// Counts `char`s, not terminal columns: wide glyphs count as one.
pub fn visible_width(text: &str) -> usize {
    strip_style_placeholders(&strip_terminal_escapes(text))
        .chars()
        .count()
}
