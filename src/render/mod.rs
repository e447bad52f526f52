//! render
//!
//! Turning a plugin into text.
//!
//! # Modules
//!
//! - [`theme`]: style names and escape codes
//! - [`text`]: visible-width measurement
//! - [`stat`]: labeled values
//! - [`humanize`]: durations and byte sizes in words
//! - [`compositor`]: the two-column layout

pub mod compositor;
pub mod humanize;
pub mod stat;
pub mod text;
pub mod theme;

pub use compositor::{compose, render, separator, GUTTER, MAX_ASCII_HEIGHT, MAX_ASCII_WIDTH};
pub use stat::{FormatOptions, Stat, StatValue};
pub use text::{strip_style_placeholders, strip_terminal_escapes, visible_width};
pub use theme::{Style, Theme, DEFAULT_THEME};
