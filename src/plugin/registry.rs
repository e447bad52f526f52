//! plugin::registry
//!
//! Ordered collection of plugin descriptors.
//!
//! The registry is built once at startup and passed by reference to the
//! resolver and the CLI. Registration order is iteration order, which is also
//! the order candidates are listed in ambiguity errors.

use std::sync::Arc;

use super::traits::PluginDescriptor;

/// Registered plugins, in registration order.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn PluginDescriptor>>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl PluginRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plugin.
    pub fn register(&mut self, plugin: Arc<dyn PluginDescriptor>) {
        self.plugins.push(plugin);
    }

    /// Replace the plugin named `old` with `new`, keeping its position.
    ///
    /// Appends `new` when `old` is not registered.
    pub fn replace_or_register(
        &mut self,
        old: &str,
        new: Arc<dyn PluginDescriptor>,
    ) -> &[Arc<dyn PluginDescriptor>] {
        match self.plugins.iter().position(|p| p.name() == old) {
            Some(index) => self.plugins[index] = new,
            None => self.plugins.push(new),
        }
        &self.plugins
    }

    pub fn plugins(&self) -> &[Arc<dyn PluginDescriptor>] {
        &self.plugins
    }

    /// Find a plugin by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<Arc<dyn PluginDescriptor>> {
        self.plugins
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
