//! plugin
//!
//! Plugin capability interface, registry and resolution.
//!
//! # Architecture
//!
//! Each hosting provider is a plugin. The CLI builds a [`PluginRegistry`]
//! once and hands it to [`resolve`], which picks exactly one plugin either
//! from an explicit selection or by asking every plugin whether it matches
//! the repository.
//!
//! # Modules
//!
//! - `traits`: [`PluginDescriptor`], [`Plugin`] and [`PluginError`]
//! - `registry`: [`PluginRegistry`]
//! - `resolver`: [`resolve`] and [`Selection`]
//! - [`mock`]: Mock implementation for deterministic testing
//!
//! # Example
//!
//! ```ignore
//! use repofetch::git::Git;
//! use repofetch::plugin::{resolve, Selection};
//!
//! let git = Git::open(Path::new("."))?;
//! let mut plugin = resolve(&registry, Selection::Repository(&git), &[])?;
//! plugin.fetch().await?;
//! ```

pub mod mock;
mod registry;
mod resolver;
mod traits;

pub use registry::PluginRegistry;
pub use resolver::{matching_plugins, resolve, Selection};
pub use traits::*;
