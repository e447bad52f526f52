//! core::config
//!
//! Configuration file loading.
//!
//! # Location
//!
//! Searched in order:
//! 1. `--config <path>` (must exist)
//! 2. `$REPOFETCH_CONFIG` if set
//! 3. `~/.repofetch.yml` (written with [`DEFAULT_CONFIG`] on first run)
//!
//! # Example
//!
//! ```no_run
//! use repofetch::core::config::Config;
//!
//! let config = Config::load_or_init().unwrap();
//! println!("Emojis: {}", config.emojis_enabled());
//! ```

pub mod schema;

pub use schema::ConfigFile;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Contents written to the default location when no config exists.
pub const DEFAULT_CONFIG: &str = "\
# Built-in plugins to enable, in the order they are tried.
plugins:
  - github
  - gitlab
  - bitbucket

# Show an emoji in front of each stat.
emojis: true
";

/// File name of the config in the home directory.
pub const CONFIG_FILE_NAME: &str = ".repofetch.yml";

/// Environment variable overriding the config location.
pub const CONFIG_ENV_VAR: &str = "REPOFETCH_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    file: ConfigFile,
    /// Path the config was loaded from, if any
    path: Option<PathBuf>,
}

impl Config {
    /// Location of the config when no path is given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if `$REPOFETCH_CONFIG` is unset and
    /// the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(CONFIG_FILE_NAME))
    }

    /// Load the config from [`Config::default_path`], creating it if missing.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        Self::load_or_init_at(&Self::default_path()?)
    }

    /// Load the config at `path`, writing [`DEFAULT_CONFIG`] there first if
    /// the file does not exist.
    pub fn load_or_init_at(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "writing default config");
            write_atomic(path, DEFAULT_CONFIG)?;
        }
        Self::load_from(path)
    }

    /// Load the config at `path`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::ReadError` if the file cannot be read (including when
    ///   it does not exist)
    /// - `ConfigError::ParseError` if it is not valid YAML for [`ConfigFile`]
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading config");
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config = Self::parse(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse YAML config contents. An empty document yields the defaults.
    pub fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
        let value: serde_yaml::Value = serde_yaml::from_str(contents)?;
        let file = if value.is_null() {
            ConfigFile::default()
        } else {
            serde_yaml::from_value(value)?
        };
        Ok(Self { file, path: None })
    }

    /// Whether stats are prefixed with emojis. Defaults to true.
    pub fn emojis_enabled(&self) -> bool {
        self.file.emojis.unwrap_or(true)
    }

    pub fn set_emojis(&mut self, enabled: bool) {
        self.file.emojis = Some(enabled);
    }

    /// Plugins to enable, in order. `None` means every built-in plugin.
    pub fn plugins(&self) -> Option<&[String]> {
        self.file.plugins.as_deref()
    }

    /// A key this version does not interpret.
    pub fn get(&self, key: &str) -> Option<&serde_yaml::Value> {
        self.file.extra.get(key)
    }

    /// Path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Write a file atomically (temp file in the same directory, then rename).
fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let write_error = |path: &Path| {
        let path = path.to_path_buf();
        move |e| ConfigError::WriteError { path, source: e }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error(path))?;
    }

    let temp_path = path.with_extension("yml.tmp");
    let mut file = fs::File::create(&temp_path).map_err(write_error(&temp_path))?;
    file.write_all(contents.as_bytes())
        .map_err(write_error(&temp_path))?;
    file.sync_all().map_err(write_error(&temp_path))?;

    fs::rename(&temp_path, path).map_err(write_error(path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.emojis_enabled());
        assert!(config.plugins().is_none());
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.emojis_enabled());
        assert_eq!(
            config.plugins(),
            Some(&["github".to_string(), "gitlab".to_string(), "bitbucket".to_string()][..])
        );
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::parse("# only a comment\n").unwrap(), Config::default());
    }

    #[test]
    fn emojis_flag() {
        assert!(!Config::parse("emojis: false").unwrap().emojis_enabled());
        assert!(Config::parse("emojis: true").unwrap().emojis_enabled());
        assert!(Config::parse("plugins: []").unwrap().emojis_enabled());
    }

    #[test]
    fn set_emojis() {
        let mut config = Config::default();
        config.set_emojis(false);
        assert!(!config.emojis_enabled());
    }

    #[test]
    fn get_returns_unknown_keys() {
        let config = Config::parse("favorite: 3").unwrap();
        assert_eq!(config.get("favorite").and_then(|v| v.as_u64()), Some(3));
        assert!(config.get("emojis").is_none());
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "emojis: [unclosed").unwrap();
        match Config::load_from(&path) {
            Err(ConfigError::ParseError { path: failed, source }) => {
                assert_eq!(failed, path);
                assert!(source.location().is_some());
            }
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let err: serde_yaml::Error = Config::parse("emojis: sometimes").unwrap_err();
        assert!(err.to_string().contains("invalid type"));
    }

    #[test]
    fn load_from_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            Config::load_from(&temp.path().join("missing.yml")),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn load_or_init_writes_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".repofetch.yml");

        let config = Config::load_or_init_at(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
        assert_eq!(config.loaded_from(), Some(path.as_path()));
        assert!(!temp.path().join(".repofetch.yml.tmp").exists());
    }

    #[test]
    fn load_or_init_keeps_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".repofetch.yml");
        fs::write(&path, "emojis: false\n").unwrap();

        let config = Config::load_or_init_at(&path).unwrap();

        assert!(!config.emojis_enabled());
        assert_eq!(fs::read_to_string(&path).unwrap(), "emojis: false\n");
    }
}
