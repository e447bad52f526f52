//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output and diagnostics
//!
//! # Design
//!
//! All terminal output goes through this module so that stdout carries only
//! the rendered result.

pub mod output;
