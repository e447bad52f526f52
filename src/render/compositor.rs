//! render::compositor
//!
//! Lays ASCII art and text lines out side by side.
//!
//! # Layout
//!
//! Every row is the art line (placeholders expanded, then a reset) followed
//! by the text line, padded so that the text always starts at column
//! `MAX_ASCII_WIDTH + GUTTER`. Art shorter than the text list leaves an empty
//! art column; text shorter than the art leaves trailing spaces. Art wider
//! than the padding is followed by a single space before the text.

use crate::plugin::Plugin;

use super::stat::FormatOptions;
use super::text::visible_width;
use super::theme::{Style, Theme};

/// Widest ASCII art a plugin should provide.
pub const MAX_ASCII_WIDTH: usize = 40;

/// Tallest ASCII art a plugin should provide.
pub const MAX_ASCII_HEIGHT: usize = 20;

/// Spaces between the art column and the text column.
pub const GUTTER: usize = 5;

/// A line of dashes as wide as the visible part of `header`.
pub fn separator(header: &str) -> String {
    "-".repeat(visible_width(header))
}

/// Pair art lines with text lines, padding the shorter side with `""`.
pub fn zip_lines<'a>(ascii: &[&'a str], text: &'a [String]) -> Vec<(&'a str, &'a str)> {
    let rows = ascii.len().max(text.len());
    (0..rows)
        .map(|i| {
            (
                ascii.get(i).copied().unwrap_or(""),
                text.get(i).map(String::as_str).unwrap_or(""),
            )
        })
        .collect()
}

/// Compose `ascii` and `text_lines` into the final block.
///
/// Each row ends with `\n`.
pub fn compose(ascii: &str, text_lines: &[String], theme: &Theme) -> String {
    let art: Vec<&str> = ascii.lines().collect();
    let padding = " ".repeat(MAX_ASCII_WIDTH + GUTTER);
    let reset = theme.style(Style::Reset);

    let mut out = String::new();
    for (art_line, text_line) in zip_lines(&art, text_lines) {
        out.push_str(&theme.substitute(art_line));
        out.push_str(&reset);
        out.extend(
            padding
                .chars()
                .chain(text_line.chars())
                .skip(visible_width(art_line).min(padding.len() - 1)),
        );
        out.push('\n');
    }
    out
}

/// The header, separator and formatted stats of `plugin`, in display order.
pub fn text_lines(plugin: &dyn Plugin, options: &FormatOptions) -> Vec<String> {
    let theme = plugin.theme();
    let header = plugin.header().format(theme);
    let separator = separator(&header);

    let mut lines = vec![header, separator];
    lines.extend(
        plugin
            .stats()
            .iter()
            .map(|stat| stat.format(theme, options)),
    );
    lines
}

/// Render `plugin` into its final two-column form.
pub fn render(plugin: &dyn Plugin, options: &FormatOptions) -> String {
    compose(plugin.ascii(), &text_lines(plugin, options), plugin.theme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::mock::MockPlugin;
    use crate::render::stat::Stat;
    use crate::render::text::strip_terminal_escapes;
    use crate::render::theme::DEFAULT_THEME;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn visible_rows(rendered: &str) -> Vec<String> {
        strip_terminal_escapes(rendered)
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn separator_matches_visible_header() {
        assert_eq!(separator("header"), "------");
        assert_eq!(separator("\x1b[1mab\x1b[0m @ \x1b[1mc\x1b[0m"), "------");
    }

    mod zip_lines {
        use super::*;

        #[test]
        fn pads_text() {
            let text = lines(&["one"]);
            let zipped = zip_lines(&["a", "b"], &text);
            assert_eq!(zipped, vec![("a", "one"), ("b", "")]);
        }

        #[test]
        fn pads_art() {
            let text = lines(&["one", "two"]);
            let zipped = zip_lines(&["a"], &text);
            assert_eq!(zipped, vec![("a", "one"), ("", "two")]);
        }

        #[test]
        fn empty() {
            assert!(zip_lines(&[], &[]).is_empty());
        }
    }

    mod compose {
        use super::*;

        #[test]
        fn text_starts_after_art_and_gutter() {
            let out = compose("1234567890", &lines(&["field 1: OK"]), &DEFAULT_THEME);
            assert_eq!(
                out,
                format!("1234567890\x1b[0m{}field 1: OK\n", " ".repeat(35))
            );
        }

        #[test]
        fn extra_text_rows_have_blank_art() {
            let out = compose(
                "ab\ncd",
                &lines(&["one", "two", "three"]),
                &DEFAULT_THEME,
            );
            let rows = visible_rows(&out);
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[2], format!("{}three", " ".repeat(45)));
        }

        #[test]
        fn extra_art_rows_have_empty_text() {
            let out = compose("a\nb\nc\nd", &[], &DEFAULT_THEME);
            let rows = visible_rows(&out);
            assert_eq!(rows.len(), 4);
            for (row, art) in rows.iter().zip(["a", "b", "c", "d"]) {
                assert_eq!(row, &format!("{}{}", art, " ".repeat(44)));
            }
        }

        #[test]
        fn placeholders_do_not_shift_text() {
            let out = compose(
                "%{red}##%{reset}\n####",
                &lines(&["x", "y"]),
                &DEFAULT_THEME,
            );
            let rows = visible_rows(&out);
            assert_eq!(rows[0].find('x'), Some(45));
            assert_eq!(rows[1].find('y'), Some(45));
            assert!(out.starts_with("\x1b[31m##\x1b[0m\x1b[0m"));
        }

        #[test]
        fn wide_art_keeps_full_text() {
            let art = "#".repeat(50);
            let out = compose(&art, &lines(&["stars: 5"]), &DEFAULT_THEME);
            assert_eq!(visible_rows(&out), vec![format!("{} stars: 5", art)]);
        }

        #[test]
        fn art_filling_padding_gets_one_space() {
            let art = "#".repeat(45);
            let out = compose(&art, &lines(&["x"]), &DEFAULT_THEME);
            assert_eq!(visible_rows(&out), vec![format!("{} x", art)]);
        }

        #[test]
        fn every_row_ends_with_newline() {
            let out = compose("a\nb", &lines(&["x"]), &DEFAULT_THEME);
            assert_eq!(out.matches('\n').count(), 2);
            assert!(out.ends_with('\n'));
        }

        #[test]
        fn empty_inputs() {
            assert_eq!(compose("", &[], &DEFAULT_THEME), "");
        }
    }

    #[test]
    fn renders_mock_plugin() {
        let plugin = MockPlugin::new(
            "mock header",
            "HELLO WORLD\n I'M ASCII",
            vec![Stat::new("foo", "bar"), Stat::new("bar", "baz")],
        );
        let rows = visible_rows(&render(&plugin, &FormatOptions::default()));

        assert_eq!(rows.len(), 4);
        assert!(rows[0].starts_with("HELLO WORLD"));
        assert!(rows[0].ends_with("mock header"));
        assert!(rows[1].starts_with(" I'M ASCII"));
        assert!(rows[1].ends_with("-----------"));
        assert_eq!(rows[2], format!("{}foo: bar", " ".repeat(45)));
        assert_eq!(rows[3], format!("{}bar: baz", " ".repeat(45)));
    }

    #[test]
    fn text_lines_do_not_consume_stats() {
        let plugin = MockPlugin::new("h", "", vec![Stat::new("foo", "bar")]);
        let options = FormatOptions::default();
        assert_eq!(text_lines(&plugin, &options), text_lines(&plugin, &options));
    }
}
