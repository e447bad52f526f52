//! render::theme
//!
//! Named terminal styles and their SGR escape codes.
//!
//! # Design
//!
//! A [`Theme`] is an immutable table from [`Style`] to a numeric SGR code.
//! Plugins that want different colors build a theme from the defaults with
//! [`Theme::with_code`]; everything else uses [`DEFAULT_THEME`].
//!
//! ASCII art refers to styles by name with `%{name}` placeholders, which
//! [`Theme::substitute`] expands into escape sequences.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use super::text::PLACEHOLDER_RE;

/// The theme used when a plugin does not provide its own.
pub static DEFAULT_THEME: Lazy<Theme> = Lazy::new(Theme::default);

/// A named terminal style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Style {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    OnBlack,
    OnRed,
    OnGreen,
    OnYellow,
    OnBlue,
    OnMagenta,
    OnCyan,
    OnWhite,
    Bold,
    Underline,
    Reset,
    Default,
}

impl Style {
    /// Every style, in declaration order.
    pub const ALL: [Style; 20] = [
        Style::Black,
        Style::Red,
        Style::Green,
        Style::Yellow,
        Style::Blue,
        Style::Magenta,
        Style::Cyan,
        Style::White,
        Style::OnBlack,
        Style::OnRed,
        Style::OnGreen,
        Style::OnYellow,
        Style::OnBlue,
        Style::OnMagenta,
        Style::OnCyan,
        Style::OnWhite,
        Style::Bold,
        Style::Underline,
        Style::Reset,
        Style::Default,
    ];

    /// The placeholder name of this style (`%{name}` in ASCII art).
    pub fn name(&self) -> &'static str {
        match self {
            Style::Black => "black",
            Style::Red => "red",
            Style::Green => "green",
            Style::Yellow => "yellow",
            Style::Blue => "blue",
            Style::Magenta => "magenta",
            Style::Cyan => "cyan",
            Style::White => "white",
            Style::OnBlack => "on_black",
            Style::OnRed => "on_red",
            Style::OnGreen => "on_green",
            Style::OnYellow => "on_yellow",
            Style::OnBlue => "on_blue",
            Style::OnMagenta => "on_magenta",
            Style::OnCyan => "on_cyan",
            Style::OnWhite => "on_white",
            Style::Bold => "bold",
            Style::Underline => "underline",
            Style::Reset => "reset",
            Style::Default => "default",
        }
    }

    /// The SGR code this style has in the default theme.
    pub fn default_code(&self) -> u8 {
        match self {
            Style::Black => 30,
            Style::Red => 31,
            Style::Green => 32,
            Style::Yellow => 33,
            Style::Blue => 34,
            Style::Magenta => 35,
            Style::Cyan => 36,
            Style::White => 37,
            Style::OnBlack => 40,
            Style::OnRed => 41,
            Style::OnGreen => 42,
            Style::OnYellow => 43,
            Style::OnBlue => 44,
            Style::OnMagenta => 45,
            Style::OnCyan => 46,
            Style::OnWhite => 47,
            Style::Bold => 1,
            Style::Underline => 4,
            Style::Reset | Style::Default => 0,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown style name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown style: {0}")]
pub struct UnknownStyle(pub String);

impl FromStr for Style {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .iter()
            .copied()
            .find(|style| style.name() == s)
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}

/// Mapping from style to SGR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    codes: BTreeMap<Style, u8>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            codes: Style::ALL
                .iter()
                .map(|style| (*style, style.default_code()))
                .collect(),
        }
    }
}

impl Theme {
    /// Return a copy of this theme with `style` mapped to `code`.
    pub fn with_code(mut self, style: Style, code: u8) -> Self {
        self.codes.insert(style, code);
        self
    }

    /// The SGR code for a style.
    pub fn code(&self, style: Style) -> u8 {
        self.codes
            .get(&style)
            .copied()
            .unwrap_or_else(|| style.default_code())
    }

    /// The escape sequence that turns `style` on.
    pub fn style(&self, style: Style) -> String {
        format!("\x1b[{}m", self.code(style))
    }

    /// Wrap `text` in `style`, followed by a reset.
    pub fn format(&self, style: Style, text: &str) -> String {
        format!("{}{}{}", self.style(style), text, self.style(Style::Reset))
    }

    /// Expand `%{name}` placeholders into escape sequences.
    ///
    /// Unknown names expand to nothing, so the visible result always matches
    /// [`strip_style_placeholders`](super::text::strip_style_placeholders).
    pub fn substitute(&self, template: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(template, |caps: &regex::Captures<'_>| {
                caps[1]
                    .parse::<Style>()
                    .map(|style| self.style(style))
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_codes() {
        let theme = Theme::default();
        assert_eq!(theme.code(Style::Red), 31);
        assert_eq!(theme.code(Style::OnWhite), 47);
        assert_eq!(theme.code(Style::Bold), 1);
        assert_eq!(theme.code(Style::Default), 0);
    }

    #[test]
    fn style_is_escape_sequence() {
        assert_eq!(DEFAULT_THEME.style(Style::Bold), "\x1b[1m");
    }

    #[test]
    fn format_wraps_and_resets() {
        assert_eq!(
            DEFAULT_THEME.format(Style::Green, "ok"),
            "\x1b[32mok\x1b[0m"
        );
    }

    #[test]
    fn with_code_overrides_one_entry() {
        let theme = Theme::default().with_code(Style::Red, 91);
        assert_eq!(theme.style(Style::Red), "\x1b[91m");
        assert_eq!(theme.code(Style::Blue), 34);
    }

    #[test]
    fn parse_round_trips_names() {
        for style in Style::ALL {
            assert_eq!(style.name().parse::<Style>(), Ok(style));
        }
        assert!("sparkly".parse::<Style>().is_err());
    }

    mod substitute {
        use super::*;

        #[test]
        fn known_placeholders() {
            assert_eq!(
                DEFAULT_THEME.substitute("%{red}#%{reset} hi"),
                "\x1b[31m#\x1b[0m hi"
            );
        }

        #[test]
        fn unknown_placeholder_is_removed() {
            assert_eq!(DEFAULT_THEME.substitute("a%{sparkly}b"), "ab");
        }

        #[test]
        fn plain_text_unchanged() {
            assert_eq!(DEFAULT_THEME.substitute("100% {plain}"), "100% {plain}");
        }
    }
}
