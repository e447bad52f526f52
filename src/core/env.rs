//! core::env
//!
//! Dotenv files in the home directory.
//!
//! Plugins read their API tokens from the environment. Tokens can also be put
//! in `~/repofetch.env` or `~/.repofetch.env`; variables already set in the
//! environment take precedence over both files.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Dotenv file names, relative to the home directory, in load order.
pub const DOTENV_FILE_NAMES: [&str; 2] = ["repofetch.env", ".repofetch.env"];

/// Full paths of the dotenv files, or nothing without a home directory.
pub fn dotenv_paths() -> Vec<PathBuf> {
    dirs::home_dir()
        .map(|home| DOTENV_FILE_NAMES.iter().map(|name| home.join(name)).collect())
        .unwrap_or_default()
}

/// Load the home-directory dotenv files. Returns the files that were read.
pub fn load_dotenv() -> Vec<PathBuf> {
    load_dotenv_from(&dotenv_paths())
}

/// Load each existing file in `paths`. Returns the files that were read.
///
/// Unreadable or malformed files are skipped with a warning.
pub fn load_dotenv_from(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|path| path.is_file())
        .filter(|path| load_one(path))
        .cloned()
        .collect()
}

fn load_one(path: &Path) -> bool {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "loaded dotenv file");
            true
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load dotenv file");
            false
        }
    }
}
