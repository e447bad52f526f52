//! git::interface
//!
//! Repository access through git2.
//!
//! # Design
//!
//! Plugins only need a repository's remotes, so the rest of the crate sees a
//! repository through the [`Repository`] trait. [`Git`] implements it over a
//! real working copy; [`StaticRepository`] holds a fixed list of remotes for
//! tests and for callers that already know their remotes.
//!
//! # Example
//!
//! ```ignore
//! use repofetch::git::{Git, Repository};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("./src"))?;  // Works from subdirectory
//! if let Some(url) = git.default_remote_url()? {
//!     println!("origin is {}", url);
//! }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Any other git2 failure.
    #[error("git error: {message}")]
    Internal {
        /// Message from git2
        message: String,
    },
}

impl From<git2::Error> for GitError {
    fn from(e: git2::Error) -> Self {
        GitError::Internal {
            message: e.message().to_string(),
        }
    }
}

/// A named remote and its fetch URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub url: String,
}

impl Remote {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Pick the remote named `origin`, else the first one.
pub fn default_remote(remotes: &[Remote]) -> Option<&Remote> {
    remotes
        .iter()
        .find(|remote| remote.name == "origin")
        .or_else(|| remotes.first())
}

/// A local repository, as far as plugins are concerned.
pub trait Repository {
    /// Configured remotes, in the order git reports them.
    fn remotes(&self) -> Result<Vec<Remote>, GitError>;

    /// The remote plugins should look at. See [`default_remote`].
    fn default_remote(&self) -> Result<Option<Remote>, GitError> {
        Ok(default_remote(&self.remotes()?).cloned())
    }

    /// URL of [`Repository::default_remote`].
    fn default_remote_url(&self) -> Result<Option<String>, GitError> {
        Ok(self.default_remote()?.map(|remote| remote.url))
    }
}

/// A git working copy opened with git2.
pub struct Git {
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Get the URL for a remote.
    ///
    /// Returns `None` if the remote doesn't exist.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>, GitError> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(String::from)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Repository for Git {
    /// Remotes without a UTF-8 URL are skipped.
    fn remotes(&self) -> Result<Vec<Remote>, GitError> {
        let names = self.repo.remotes()?;
        let mut remotes = Vec::new();
        for name in names.iter().flatten() {
            if let Some(url) = self.remote_url(name)? {
                remotes.push(Remote::new(name, url));
            }
        }
        Ok(remotes)
    }
}

/// A repository described only by its remotes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRepository {
    remotes: Vec<Remote>,
}

impl StaticRepository {
    pub fn new(remotes: Vec<Remote>) -> Self {
        Self { remotes }
    }

    /// Append a remote.
    pub fn with_remote(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.remotes.push(Remote::new(name, url));
        self
    }
}

impl Repository for StaticRepository {
    fn remotes(&self) -> Result<Vec<Remote>, GitError> {
        Ok(self.remotes.clone())
    }
}
