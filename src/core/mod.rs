//! core
//!
//! User-level settings for repofetch.
//!
//! # Modules
//!
//! - [`config`] - Configuration schema and loading
//! - [`env`] - Dotenv files with API tokens

pub mod config;
pub mod env;
