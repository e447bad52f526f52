//! plugin::traits
//!
//! The plugin capability interface.
//!
//! # Design
//!
//! A plugin has two halves:
//!
//! - [`PluginDescriptor`]: registered once, answers "does this repository
//!   belong to me?" and builds instances.
//! - [`Plugin`]: one instance per run, fetches remote data and describes
//!   what to render.
//!
//! `matches_repo` and `from_repository` have default implementations that
//! report [`PluginError::CapabilityNotImplemented`], so a plugin that can only
//! be selected explicitly only implements `from_args`.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::git::{GitError, Repository};
use crate::providers::ProviderError;
use crate::render::{Stat, Style, Theme, DEFAULT_THEME};

/// An optional plugin capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    MatchesRepo,
    FromRepository,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::MatchesRepo => f.write_str("matches_repo"),
            Capability::FromRepository => f.write_str("from_repository"),
        }
    }
}

/// Errors from resolving and running plugins.
#[derive(Debug, Error)]
pub enum PluginError {
    /// No registered plugin claimed the repository.
    #[error("no plugin supports this repository")]
    NoPluginsFound,

    /// More than one registered plugin claimed the repository.
    #[error("multiple plugins match this repository: {}", candidates.join(", "))]
    AmbiguousPlugins {
        /// Names of the matching plugins, in registration order
        candidates: Vec<String>,
    },

    /// The plugin was invoked with arguments it cannot use.
    ///
    /// The message is shown to the user as-is.
    #[error("{0}")]
    Usage(String),

    /// The plugin does not provide an optional capability.
    #[error("plugin '{plugin}' does not implement {capability}")]
    CapabilityNotImplemented {
        /// Name of the plugin
        plugin: String,
        /// The missing capability
        capability: Capability,
    },

    /// The provider API failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Reading the local repository failed.
    #[error(transparent)]
    Git(#[from] GitError),
}

impl PluginError {
    /// Shorthand for [`PluginError::CapabilityNotImplemented`].
    pub fn not_implemented(plugin: &str, capability: Capability) -> Self {
        PluginError::CapabilityNotImplemented {
            plugin: plugin.to_string(),
            capability,
        }
    }
}

/// A registered plugin.
pub trait PluginDescriptor: Send + Sync {
    /// Stable lowercase name, used by `--plugin NAME` and `--NAME`.
    fn name(&self) -> &str;

    /// Name shown to people.
    fn display_name(&self) -> &str {
        self.name()
    }

    /// Whether this plugin handles `repo`.
    fn matches_repo(&self, _repo: &dyn Repository) -> Result<bool, PluginError> {
        Err(PluginError::not_implemented(
            self.name(),
            Capability::MatchesRepo,
        ))
    }

    /// Build an instance for a repository this plugin matched.
    ///
    /// Implementations must return [`PluginError::Usage`] when `args` is not
    /// empty.
    fn from_repository(
        &self,
        _repo: &dyn Repository,
        _args: &[String],
    ) -> Result<Box<dyn Plugin>, PluginError> {
        Err(PluginError::not_implemented(
            self.name(),
            Capability::FromRepository,
        ))
    }

    /// Build an instance from explicit command-line arguments.
    fn from_args(&self, args: &[String]) -> Result<Box<dyn Plugin>, PluginError>;
}

/// Header line of a plugin's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    /// Shown verbatim.
    Text(String),
    /// Each part shown bold, joined with `" @ "`.
    Parts(Vec<String>),
}

impl Header {
    pub fn format(&self, theme: &Theme) -> String {
        match self {
            Header::Text(text) => text.clone(),
            Header::Parts(parts) => parts
                .iter()
                .map(|part| theme.format(Style::Bold, part))
                .collect::<Vec<_>>()
                .join(" @ "),
        }
    }
}

impl From<&str> for Header {
    fn from(text: &str) -> Self {
        Header::Text(text.to_string())
    }
}

impl From<String> for Header {
    fn from(text: String) -> Self {
        Header::Text(text)
    }
}

/// A plugin instance for one repository.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Load remote data needed by [`Plugin::stats`].
    async fn fetch(&mut self) -> Result<(), PluginError> {
        Ok(())
    }

    fn header(&self) -> Header;

    /// ASCII art, at most 40 columns by 20 rows.
    fn ascii(&self) -> &str;

    fn stats(&self) -> Vec<Stat> {
        Vec::new()
    }

    fn theme(&self) -> &Theme {
        &DEFAULT_THEME
    }
}
