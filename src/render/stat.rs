//! render::stat
//!
//! A single labeled value shown in the right-hand column.
//!
//! # Design
//!
//! Stats are built with a small builder (`with_emoji`, `with_label_styles`)
//! and never change afterwards. Styling happens in [`Stat::format`], which
//! takes the theme and options as parameters and returns a new string.

use std::fmt;

use chrono::{DateTime, Utc};

use super::humanize::time_ago;
use super::theme::{Style, Theme};

/// Options that affect how stats are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Prefix stats with their emoji.
    pub emojis: bool,
    /// Reference instant for timespan values. `None` means the current time.
    pub now: Option<DateTime<Utc>>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            emojis: true,
            now: None,
        }
    }
}

impl FormatOptions {
    /// Options with the emoji flag set.
    pub fn with_emojis(emojis: bool) -> Self {
        Self {
            emojis,
            ..Self::default()
        }
    }
}

/// The value of a stat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatValue {
    /// Preformatted text.
    Text(String),
    /// An instant shown as "N units ago".
    Timespan(DateTime<Utc>),
}

/// A labeled statistic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    label: String,
    value: StatValue,
    emoji: Option<String>,
    label_styles: Vec<Style>,
}

impl Stat {
    /// Create a stat whose value is displayed as-is.
    pub fn new(label: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            label: label.into(),
            value: StatValue::Text(value.to_string()),
            emoji: None,
            label_styles: Vec::new(),
        }
    }

    /// Create a stat displayed as the time elapsed since `instant`.
    pub fn timespan(label: impl Into<String>, instant: DateTime<Utc>) -> Self {
        Self {
            label: label.into(),
            value: StatValue::Timespan(instant),
            emoji: None,
            label_styles: Vec::new(),
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Styles applied to the label, innermost first.
    pub fn with_label_styles(mut self, styles: impl IntoIterator<Item = Style>) -> Self {
        self.label_styles.extend(styles);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &StatValue {
        &self.value
    }

    pub fn emoji(&self) -> Option<&str> {
        self.emoji.as_deref()
    }

    pub fn label_styles(&self) -> &[Style] {
        &self.label_styles
    }

    /// The value as text, with timespans relative to the current time.
    pub fn format_value(&self) -> String {
        self.format_value_at(Utc::now())
    }

    /// The value as text, with timespans relative to `now`.
    pub fn format_value_at(&self, now: DateTime<Utc>) -> String {
        match &self.value {
            StatValue::Text(text) => text.clone(),
            StatValue::Timespan(instant) => time_ago(*instant, now),
        }
    }

    /// `"<emoji><label>: <value>"` without any styling.
    pub fn to_text(&self, emojis: bool) -> String {
        self.render(self.label.clone(), emojis, Utc::now())
    }

    /// `"<emoji><label>: <value>"` with the label styles applied by `theme`.
    pub fn format(&self, theme: &Theme, options: &FormatOptions) -> String {
        let label = self
            .label_styles
            .iter()
            .fold(self.label.clone(), |text, style| theme.format(*style, &text));
        self.render(label, options.emojis, options.now.unwrap_or_else(Utc::now))
    }

    fn render(&self, label: String, emojis: bool, now: DateTime<Utc>) -> String {
        let emoji = if emojis {
            self.emoji.as_deref().unwrap_or("")
        } else {
            ""
        };
        format!("{}{}: {}", emoji, label, self.format_value_at(now))
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(true))
    }
}
