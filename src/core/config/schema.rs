//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Example
//!
//! ```yaml
//! plugins:
//!   - github
//!   - gitlab
//! emojis: false
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Contents of `~/.repofetch.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    /// Built-in plugins to enable, in registration order. Missing means all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<String>>,

    /// Prefix stats with emojis. Missing means true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emojis: Option<bool>,

    /// Keys this version does not know about, kept as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys() {
        let file: ConfigFile = serde_yaml::from_str("plugins: [github]\nemojis: false\n").unwrap();
        assert_eq!(file.plugins, Some(vec!["github".to_string()]));
        assert_eq!(file.emojis, Some(false));
        assert!(file.extra.is_empty());
    }

    #[test]
    fn unknown_keys_are_kept() {
        let file: ConfigFile = serde_yaml::from_str("theme: dark\n").unwrap();
        assert_eq!(
            file.extra.get("theme"),
            Some(&serde_yaml::Value::String("dark".into()))
        );
        assert!(file.plugins.is_none());
    }
}
