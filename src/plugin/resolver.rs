//! plugin::resolver
//!
//! Choosing the plugin for a run.
//!
//! # Rules
//!
//! - An explicitly selected plugin is built from the command-line arguments;
//!   no repository is consulted.
//! - Otherwise every registered plugin is asked whether it matches the
//!   repository. Plugins without `matches_repo` are skipped with a warning.
//! - Exactly one plugin must match.

use std::sync::Arc;

use tracing::{debug, warn};

use super::registry::PluginRegistry;
use super::traits::{Capability, Plugin, PluginDescriptor, PluginError};
use crate::git::Repository;

/// How the plugin for a run is chosen.
pub enum Selection<'a> {
    /// The user named a plugin.
    Explicit(Arc<dyn PluginDescriptor>),
    /// Detect the plugin from a repository.
    Repository(&'a dyn Repository),
}

/// Registered plugins that claim `repo`, in registration order.
pub fn matching_plugins(
    registry: &PluginRegistry,
    repo: &dyn Repository,
) -> Result<Vec<Arc<dyn PluginDescriptor>>, PluginError> {
    let mut matches = Vec::new();
    for plugin in registry.plugins() {
        match plugin.matches_repo(repo) {
            Ok(true) => {
                debug!(plugin = plugin.name(), "plugin matches repository");
                matches.push(Arc::clone(plugin));
            }
            Ok(false) => {}
            Err(PluginError::CapabilityNotImplemented {
                capability: Capability::MatchesRepo,
                ..
            }) => {
                warn!(
                    plugin = plugin.name(),
                    "plugin does not implement matches_repo, skipping"
                );
            }
            Err(e) => return Err(e),
        }
    }
    Ok(matches)
}

/// Build the plugin instance for this run.
///
/// # Errors
///
/// - [`PluginError::NoPluginsFound`] if no plugin matches the repository
/// - [`PluginError::AmbiguousPlugins`] if more than one does
/// - whatever the chosen plugin's factory returns
pub fn resolve(
    registry: &PluginRegistry,
    selection: Selection<'_>,
    args: &[String],
) -> Result<Box<dyn Plugin>, PluginError> {
    match selection {
        Selection::Explicit(plugin) => {
            debug!(plugin = plugin.name(), "using explicitly selected plugin");
            plugin.from_args(args)
        }
        Selection::Repository(repo) => {
            let mut matches = matching_plugins(registry, repo)?;
            match matches.len() {
                0 => Err(PluginError::NoPluginsFound),
                1 => {
                    let plugin = matches.remove(0);
                    plugin.from_repository(repo, args)
                }
                _ => Err(PluginError::AmbiguousPlugins {
                    candidates: matches.iter().map(|p| p.name().to_string()).collect(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::StaticRepository;
    use crate::git::Repository;
    use crate::plugin::mock::MockDescriptor;

    fn registry(plugins: Vec<MockDescriptor>) -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        for plugin in plugins {
            registry.register(Arc::new(plugin));
        }
        registry
    }

    fn repo() -> StaticRepository {
        StaticRepository::default().with_remote("origin", "https://example.com/o/r.git")
    }

    #[test]
    fn single_match_builds_from_repository() {
        let registry = registry(vec![
            MockDescriptor::new("no").matching(false),
            MockDescriptor::new("yes").matching(true),
        ]);
        let repo = repo();
        let plugin = resolve(&registry, Selection::Repository(&repo), &[]).unwrap();
        assert_eq!(plugin.header().format(plugin.theme()), "yes");
    }

    #[test]
    fn no_match() {
        let registry = registry(vec![MockDescriptor::new("no").matching(false)]);
        let repo = repo();
        let result = resolve(&registry, Selection::Repository(&repo), &[]);
        assert!(matches!(result, Err(PluginError::NoPluginsFound)));
    }

    #[test]
    fn empty_registry_finds_nothing() {
        let repo = repo();
        let result = resolve(&PluginRegistry::new(), Selection::Repository(&repo), &[]);
        assert!(matches!(result, Err(PluginError::NoPluginsFound)));
    }

    #[test]
    fn two_matches_are_ambiguous() {
        let registry = registry(vec![
            MockDescriptor::new("first").matching(true),
            MockDescriptor::new("other").matching(false),
            MockDescriptor::new("second").matching(true),
        ]);
        let repo = repo();
        match resolve(&registry, Selection::Repository(&repo), &[]) {
            Err(PluginError::AmbiguousPlugins { candidates }) => {
                assert_eq!(candidates, vec!["first", "second"]);
            }
            Err(e) => panic!("expected AmbiguousPlugins, got {e}"),
            Ok(_) => panic!("expected AmbiguousPlugins, got a plugin"),
        }
    }

    #[test]
    #[tracing_test::traced_test]
    fn unimplemented_matcher_is_skipped_with_warning() {
        let registry = registry(vec![
            MockDescriptor::new("explicit-only"),
            MockDescriptor::new("yes").matching(true),
        ]);
        let repo = repo();
        let plugin = resolve(&registry, Selection::Repository(&repo), &[]).unwrap();
        assert_eq!(plugin.header().format(plugin.theme()), "yes");
        assert!(logs_contain("explicit-only"));
        assert!(logs_contain("does not implement matches_repo"));
    }

    #[test]
    fn only_unimplemented_matchers_find_nothing() {
        let registry = registry(vec![MockDescriptor::new("explicit-only")]);
        let repo = repo();
        let result = resolve(&registry, Selection::Repository(&repo), &[]);
        assert!(matches!(result, Err(PluginError::NoPluginsFound)));
    }

    #[test]
    fn args_with_repository_match_are_rejected() {
        let registry = registry(vec![MockDescriptor::new("yes").matching(true)]);
        let repo = repo();
        let args = vec!["extra".to_string()];
        let result = resolve(&registry, Selection::Repository(&repo), &args);
        assert!(matches!(result, Err(PluginError::Usage(_))));
    }

    #[test]
    fn explicit_selection_uses_args() {
        let registry = PluginRegistry::new();
        let plugin: Arc<dyn PluginDescriptor> = Arc::new(MockDescriptor::new("mock"));
        let args = vec!["custom header".to_string()];
        let instance = resolve(&registry, Selection::Explicit(plugin), &args).unwrap();
        assert_eq!(instance.header().format(instance.theme()), "custom header");
    }

    #[test]
    fn factory_without_from_repository_is_fatal() {
        let registry = registry(vec![MockDescriptor::new("half")
            .matching(true)
            .without_from_repository()]);
        let repo = repo();
        let result = resolve(&registry, Selection::Repository(&repo), &[]);
        assert!(matches!(
            result,
            Err(PluginError::CapabilityNotImplemented {
                capability: Capability::FromRepository,
                ..
            })
        ));
    }

    #[test]
    fn explicit_selection_never_matches() {
        let descriptor = MockDescriptor::new("mock").matching(true);
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(descriptor.clone()));

        let selected: Arc<dyn PluginDescriptor> = Arc::new(descriptor.clone());
        resolve(&registry, Selection::Explicit(selected), &[]).unwrap();
        assert_eq!(descriptor.match_calls(), 0);

        let repo = repo();
        resolve(&registry, Selection::Repository(&repo), &[]).unwrap();
        assert_eq!(descriptor.match_calls(), 1);
    }

    /// Matcher that reports a missing capability other than `matches_repo`.
    struct BrokenMatcher;

    impl PluginDescriptor for BrokenMatcher {
        fn name(&self) -> &str {
            "broken"
        }

        fn matches_repo(&self, _repo: &dyn Repository) -> Result<bool, PluginError> {
            Err(PluginError::not_implemented("broken", Capability::FromRepository))
        }

        fn from_args(&self, _args: &[String]) -> Result<Box<dyn Plugin>, PluginError> {
            Err(PluginError::Usage("usage".into()))
        }
    }

    #[test]
    fn other_missing_capability_from_matcher_propagates() {
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(BrokenMatcher));
        let repo = repo();
        let result = matching_plugins(&registry, &repo);
        assert!(matches!(
            result,
            Err(PluginError::CapabilityNotImplemented {
                capability: Capability::FromRepository,
                ..
            })
        ));
    }
}
