//! plugin::mock
//!
//! Mock plugin for deterministic testing.
//!
//! # Design
//!
//! [`MockDescriptor`] can be configured to match or not match any
//! repository, or to leave `matches_repo` unimplemented. The instances it
//! builds are [`MockPlugin`]s whose header is the descriptor name, or the
//! first argument when selected explicitly.
//!
//! # Example
//!
//! ```
//! use repofetch::plugin::mock::MockPlugin;
//! use repofetch::render::{render, FormatOptions, Stat};
//!
//! let plugin = MockPlugin::new("mock header", "HELLO", vec![Stat::new("foo", "bar")]);
//! let output = render(&plugin, &FormatOptions::default());
//! assert!(output.contains("foo: bar"));
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::traits::{Capability, Header, Plugin, PluginDescriptor, PluginError};
use crate::git::Repository;
use crate::render::Stat;

/// Mock plugin descriptor.
#[derive(Debug, Clone)]
pub struct MockDescriptor {
    name: String,
    /// `None` leaves `matches_repo` unimplemented.
    matches: Option<bool>,
    from_repository: bool,
    /// Instance returned by `from_repository`, if set.
    plugin: Option<MockPlugin>,
    /// Number of times `matches_repo` was called, shared across clones.
    match_calls: Arc<AtomicUsize>,
}

impl MockDescriptor {
    /// A descriptor that only supports explicit selection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matches: None,
            from_repository: true,
            plugin: None,
            match_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answer `matches_repo` with `matches` for every repository.
    pub fn matching(mut self, matches: bool) -> Self {
        self.matches = Some(matches);
        self
    }

    /// Leave `from_repository` unimplemented.
    pub fn without_from_repository(mut self) -> Self {
        self.from_repository = false;
        self
    }

    /// Return `plugin` from `from_repository` instead of an empty instance.
    pub fn with_plugin(mut self, plugin: MockPlugin) -> Self {
        self.plugin = Some(plugin);
        self
    }

    pub fn match_calls(&self) -> usize {
        self.match_calls.load(Ordering::SeqCst)
    }
}

impl PluginDescriptor for MockDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches_repo(&self, repo: &dyn Repository) -> Result<bool, PluginError> {
        self.match_calls.fetch_add(1, Ordering::SeqCst);
        match self.matches {
            Some(matches) => {
                repo.remotes()?;
                Ok(matches)
            }
            None => Err(PluginError::not_implemented(
                &self.name,
                Capability::MatchesRepo,
            )),
        }
    }

    fn from_repository(
        &self,
        _repo: &dyn Repository,
        args: &[String],
    ) -> Result<Box<dyn Plugin>, PluginError> {
        if !self.from_repository {
            return Err(PluginError::not_implemented(
                &self.name,
                Capability::FromRepository,
            ));
        }
        if !args.is_empty() {
            return Err(PluginError::Usage(format!(
                "{} takes no arguments when detected from a repository",
                self.name
            )));
        }
        let plugin = self
            .plugin
            .clone()
            .unwrap_or_else(|| MockPlugin::new(self.name.as_str(), "", Vec::new()));
        Ok(Box::new(plugin))
    }

    fn from_args(&self, args: &[String]) -> Result<Box<dyn Plugin>, PluginError> {
        let header = args.first().cloned().unwrap_or_else(|| self.name.clone());
        Ok(Box::new(MockPlugin::new(header, "", Vec::new())))
    }
}

/// Mock plugin instance with fixed output.
#[derive(Debug, Clone)]
pub struct MockPlugin {
    header: Header,
    ascii: String,
    stats: Vec<Stat>,
    fetched: bool,
}

impl MockPlugin {
    pub fn new(header: impl Into<Header>, ascii: impl Into<String>, stats: Vec<Stat>) -> Self {
        Self {
            header: header.into(),
            ascii: ascii.into(),
            stats,
            fetched: false,
        }
    }

    /// Whether [`Plugin::fetch`] has run.
    pub fn fetched(&self) -> bool {
        self.fetched
    }
}

#[async_trait]
impl Plugin for MockPlugin {
    async fn fetch(&mut self) -> Result<(), PluginError> {
        self.fetched = true;
        Ok(())
    }

    fn header(&self) -> Header {
        self.header.clone()
    }

    fn ascii(&self) -> &str {
        &self.ascii
    }

    fn stats(&self) -> Vec<Stat> {
        self.stats.clone()
    }
}
