//! git
//!
//! Local repository access.
//!
//! This module is the only place that imports `git2`. Plugins receive a
//! `&dyn Repository` and only ever ask it for remotes.

mod interface;

pub use interface::{default_remote, Git, GitError, Remote, Repository, StaticRepository};
