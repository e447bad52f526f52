//! providers
//!
//! Built-in plugins for hosting services.
//!
//! # Architecture
//!
//! Each provider module exposes a descriptor (registered in a
//! [`PluginRegistry`]) and a plugin instance that talks to the provider's
//! REST API with `reqwest`. The CLI never names a provider type directly; it
//! builds the registry with [`builtin_registry`].
//!
//! # Modules
//!
//! - [`github`]: GitHub REST API
//! - [`gitlab`]: GitLab REST API (v4)
//! - [`bitbucket`]: Bitbucket Cloud REST API (2.0)
//! - `http`: request plumbing and status mapping

pub mod bitbucket;
pub mod github;
pub mod gitlab;
mod http;

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::plugin::{PluginDescriptor, PluginError, PluginRegistry};
use crate::render::Style;

/// Errors from provider API calls.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// Styles applied to every built-in stat label.
pub(crate) const LABEL_STYLES: [Style; 2] = [Style::Bold, Style::Blue];

/// Names of the built-in plugins, in default registration order.
pub const BUILTIN_NAMES: [&str; 3] = [github::NAME, gitlab::NAME, bitbucket::NAME];

/// The built-in descriptor called `name`, if any.
pub fn builtin(name: &str) -> Option<Arc<dyn PluginDescriptor>> {
    match name.to_ascii_lowercase().as_str() {
        github::NAME => Some(Arc::new(github::GitHubProvider::new())),
        gitlab::NAME => Some(Arc::new(gitlab::GitLabProvider::new())),
        bitbucket::NAME => Some(Arc::new(bitbucket::BitbucketProvider::new())),
        _ => None,
    }
}

/// Registry of the enabled built-in plugins.
///
/// `enabled` lists plugin names in registration order; `None` enables every
/// built-in. Unknown names are skipped with a warning.
pub fn builtin_registry(enabled: Option<&[String]>) -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    match enabled {
        Some(names) => {
            for name in names {
                match builtin(name) {
                    Some(plugin) if registry.find(plugin.name()).is_none() => {
                        registry.register(plugin)
                    }
                    Some(_) => {}
                    None => warn!(plugin = name.as_str(), "unknown plugin in config, skipping"),
                }
            }
        }
        None => {
            for name in BUILTIN_NAMES {
                if let Some(plugin) = builtin(name) {
                    registry.register(plugin);
                }
            }
        }
    }
    registry
}

/// Parse a single `OWNER/NAME` argument.
pub(crate) fn parse_owner_repo_arg(args: &[String]) -> Option<(String, String)> {
    let [arg] = args else {
        return None;
    };
    let (owner, repo) = arg.split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}

/// Usage error for arguments passed to an automatically detected plugin.
pub(crate) fn args_need_explicit_plugin(usage: &str) -> PluginError {
    PluginError::Usage(format!(
        "Arguments require selecting the plugin explicitly.\n\n{}",
        usage
    ))
}
