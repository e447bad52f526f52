//! providers::github
//!
//! GitHub plugin using the REST API.
//!
//! # Design
//!
//! [`GitHubProvider`] is the registered descriptor. It recognizes
//! `https://github.com/OWNER/REPO` and `git@github.com:OWNER/REPO` remotes and
//! builds a [`GitHubPlugin`], which fetches the repository and two search
//! counts (open issues and open pull requests).
//!
//! # Authentication
//!
//! `GITHUB_TOKEN` is optional. When set it is sent as a bearer token, which
//! raises the API rate limit.
//!
//! # Rate Limiting
//!
//! Returns `ProviderError::RateLimited` when limits are hit. No retry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;

use super::{args_need_explicit_plugin, http, parse_owner_repo_arg, LABEL_STYLES};
use crate::git::Repository;
use crate::plugin::{Header, Plugin, PluginDescriptor, PluginError};
use crate::render::humanize::human_size;
use crate::render::Stat;

/// Registry name of this plugin.
pub const NAME: &str = "github";

/// Default GitHub API base URL.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Environment variable holding the API token.
const TOKEN_VAR: &str = "GITHUB_TOKEN";

const ASCII: &str = include_str!("ascii/github.ascii");

static HTTP_REMOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://github\.com/(?P<owner>[\w.\-]+)/(?P<repo>[\w.\-]+)")
        .expect("github http remote regex should compile")
});

static SSH_REMOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^git@github\.com:(?P<owner>[\w.\-]+)/(?P<repo>[\w.\-]+)")
        .expect("github ssh remote regex should compile")
});

/// Parse a GitHub remote URL into `(owner, repo)`.
///
/// Handles both HTTPS and SSH URLs:
/// - `https://github.com/owner/repo.git` -> `Some(("owner", "repo"))`
/// - `git@github.com:owner/repo.git` -> `Some(("owner", "repo"))`
///
/// Returns `None` for non-GitHub URLs.
pub fn parse_github_url(url: &str) -> Option<(String, String)> {
    let caps = HTTP_REMOTE_RE
        .captures(url)
        .or_else(|| SSH_REMOTE_RE.captures(url))?;
    let repo = caps["repo"].strip_suffix(".git").unwrap_or(&caps["repo"]);
    if repo.is_empty() {
        return None;
    }
    Some((caps["owner"].to_string(), repo.to_string()))
}

/// The GitHub plugin descriptor.
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    api_base: String,
}

impl Default for GitHubProvider {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl GitHubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different API base (GitHub Enterprise, tests).
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    pub fn usage() -> String {
        format!(
            "Usage: repofetch --{NAME} -- OWNER/REPOSITORY\n\n\
             Set {TOKEN_VAR} to authenticate and raise the API rate limit."
        )
    }

    fn build(&self, owner: String, repo: String) -> Box<dyn Plugin> {
        Box::new(
            GitHubPlugin::new(owner, repo)
                .with_api_base(self.api_base.clone())
                .with_token(http::token_from_env(TOKEN_VAR)),
        )
    }
}

impl PluginDescriptor for GitHubProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn display_name(&self) -> &str {
        "GitHub"
    }

    fn matches_repo(&self, repo: &dyn Repository) -> Result<bool, PluginError> {
        Ok(repo
            .default_remote_url()?
            .is_some_and(|url| parse_github_url(&url).is_some()))
    }

    fn from_repository(
        &self,
        repo: &dyn Repository,
        args: &[String],
    ) -> Result<Box<dyn Plugin>, PluginError> {
        if !args.is_empty() {
            return Err(args_need_explicit_plugin(&Self::usage()));
        }
        let url = repo.default_remote_url()?.unwrap_or_default();
        let (owner, name) = parse_github_url(&url).ok_or_else(|| {
            PluginError::Usage(format!("remote {:?} is not a GitHub remote", url))
        })?;
        Ok(self.build(owner, name))
    }

    fn from_args(&self, args: &[String]) -> Result<Box<dyn Plugin>, PluginError> {
        let (owner, repo) =
            parse_owner_repo_arg(args).ok_or_else(|| PluginError::Usage(Self::usage()))?;
        Ok(self.build(owner, repo))
    }
}

/// Repository fields used for stats.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepository {
    pub clone_url: String,
    pub stargazers_count: u64,
    pub subscribers_count: u64,
    pub forks_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Size in KiB.
    pub size: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    total_count: u64,
}

#[derive(Debug, Clone)]
struct Fetched {
    repository: GitHubRepository,
    issues: u64,
    pull_requests: u64,
}

/// A GitHub repository and its fetched data.
pub struct GitHubPlugin {
    client: Client,
    token: Option<String>,
    owner: String,
    repo: String,
    api_base: String,
    fetched: Option<Fetched>,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubPlugin")
            .field("has_token", &self.token.is_some())
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .field("fetched", &self.fetched.is_some())
            .finish()
    }
}

impl GitHubPlugin {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client: http::client(),
            token: None,
            owner: owner.into(),
            repo: repo.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            fetched: None,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// `owner/repo`.
    pub fn repo_id(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn headers(&self) -> Result<HeaderMap, PluginError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            headers.insert(AUTHORIZATION, http::bearer(token)?);
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// `GET /repos/{owner}/{repo}`.
    pub async fn repository(&self) -> Result<GitHubRepository, PluginError> {
        let url = format!("{}/repos/{}/{}", self.api_base, self.owner, self.repo);
        let response = http::send(self.client.get(&url).headers(self.headers()?)).await?;
        Ok(http::handle_response("GitHub", response).await?)
    }

    /// Total results of an issue search qualified with `is:{kind}`.
    pub async fn search_count(&self, kind: &str) -> Result<u64, PluginError> {
        let url = format!("{}/search/issues", self.api_base);
        let query = format!("repo:{} is:{}", self.repo_id(), kind);
        let request = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .query(&[("q", query.as_str()), ("per_page", "1")]);
        let response = http::send(request).await?;
        let search: SearchResponse = http::handle_response("GitHub", response).await?;
        Ok(search.total_count)
    }
}

#[async_trait]
impl Plugin for GitHubPlugin {
    async fn fetch(&mut self) -> Result<(), PluginError> {
        let repository = self.repository().await?;
        let issues = self.search_count("issue").await?;
        let pull_requests = self.search_count("pr").await?;
        self.fetched = Some(Fetched {
            repository,
            issues,
            pull_requests,
        });
        Ok(())
    }

    fn header(&self) -> Header {
        Header::Parts(vec![self.repo_id(), "GitHub".to_string()])
    }

    fn ascii(&self) -> &str {
        ASCII
    }

    fn stats(&self) -> Vec<Stat> {
        let Some(data) = &self.fetched else {
            return Vec::new();
        };
        let repo = &data.repository;
        vec![
            Stat::new("URL", &repo.clone_url).with_emoji("🌐"),
            Stat::new("stargazers", repo.stargazers_count).with_emoji("⭐"),
            Stat::new("subscribers", repo.subscribers_count).with_emoji("👀"),
            Stat::new("forks", repo.forks_count).with_emoji("🔱"),
            Stat::timespan("created", repo.created_at).with_emoji("🐣"),
            Stat::timespan("updated", repo.updated_at).with_emoji("📤"),
            Stat::new("size", human_size(repo.size.saturating_mul(1024))).with_emoji("💽"),
            Stat::new("issues", data.issues).with_emoji("❗"),
            Stat::new("pull requests", data.pull_requests).with_emoji("🔀"),
        ]
        .into_iter()
        .map(|stat| stat.with_label_styles(LABEL_STYLES))
        .collect()
    }
}
