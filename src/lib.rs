//! repofetch - Fetch and display stats about a repository's remote host
//!
//! repofetch prints ASCII art for a hosting service next to a list of stats
//! about a repository (stars, forks, open issues, ...), in the spirit of
//! neofetch.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, drives a run)
//! - [`core`] - User configuration and dotenv loading
//! - [`git`] - Reading remotes from a local repository
//! - [`plugin`] - Plugin traits, registry and resolution
//! - [`providers`] - Built-in plugins (GitHub, GitLab, Bitbucket)
//! - [`render`] - Stats, themes, text utilities and the output compositor
//! - [`ui`] - Terminal output
//!
//! # Invariants
//!
//! 1. Plugin selection is either explicit or exactly one matching plugin
//! 2. Rendering never mutates stats or themes
//! 3. Stripping styles and escapes is idempotent

pub mod cli;
pub mod core;
pub mod git;
pub mod plugin;
pub mod providers;
pub mod render;
pub mod ui;
