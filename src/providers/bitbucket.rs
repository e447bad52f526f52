//! providers::bitbucket
//!
//! Bitbucket Cloud plugin using the REST API (2.0).
//!
//! Most counts come from the `size` field of a paged collection response
//! (`/watchers`, `/forks`, `/issues`, `/pullrequests`). Repositories with the
//! issue tracker disabled answer `/issues` with 404, and the issues stat is
//! left out.
//!
//! `BITBUCKET_TOKEN` is optional and sent as a bearer token.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;

use super::{args_need_explicit_plugin, http, parse_owner_repo_arg, ProviderError, LABEL_STYLES};
use crate::git::Repository;
use crate::plugin::{Header, Plugin, PluginDescriptor, PluginError};
use crate::render::humanize::human_size;
use crate::render::Stat;

/// Registry name of this plugin.
pub const NAME: &str = "bitbucket";

const DEFAULT_API_BASE: &str = "https://api.bitbucket.org/2.0";

const TOKEN_VAR: &str = "BITBUCKET_TOKEN";

const ASCII: &str = include_str!("ascii/bitbucket.ascii");

static HTTP_REMOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:[^@/]+@)?bitbucket\.org/(?P<owner>[\w.\-]+)/(?P<repo>[\w.\-]+?)(?:\.git)?/?$")
        .expect("bitbucket http remote regex should compile")
});

static SSH_REMOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:ssh://)?git@bitbucket\.org[:/](?P<owner>[\w.\-]+)/(?P<repo>[\w.\-]+?)(?:\.git)?/?$")
        .expect("bitbucket ssh remote regex should compile")
});

/// Parse a Bitbucket Cloud remote URL into `(workspace, repo)`.
pub fn parse_bitbucket_url(url: &str) -> Option<(String, String)> {
    let caps = HTTP_REMOTE_RE
        .captures(url)
        .or_else(|| SSH_REMOTE_RE.captures(url))?;
    Some((caps["owner"].to_string(), caps["repo"].to_string()))
}

/// The Bitbucket Cloud plugin descriptor.
#[derive(Debug, Clone)]
pub struct BitbucketProvider {
    api_base: String,
}

impl Default for BitbucketProvider {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl BitbucketProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    pub fn usage() -> String {
        format!(
            "Usage: repofetch --{NAME} -- WORKSPACE/REPOSITORY\n\n\
             Set {TOKEN_VAR} to access private repositories."
        )
    }

    fn build(&self, workspace: String, repo: String) -> Box<dyn Plugin> {
        Box::new(
            BitbucketPlugin::new(workspace, repo)
                .with_api_base(self.api_base.clone())
                .with_token(http::token_from_env(TOKEN_VAR)),
        )
    }
}

impl PluginDescriptor for BitbucketProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn display_name(&self) -> &str {
        "Bitbucket"
    }

    fn matches_repo(&self, repo: &dyn Repository) -> Result<bool, PluginError> {
        Ok(repo
            .default_remote_url()?
            .is_some_and(|url| parse_bitbucket_url(&url).is_some()))
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
        let (workspace, name) = parse_bitbucket_url(&url).ok_or_else(|| {
            PluginError::Usage(format!("remote {:?} is not a Bitbucket remote", url))
        })?;
        Ok(self.build(workspace, name))
    }

    fn from_args(&self, args: &[String]) -> Result<Box<dyn Plugin>, PluginError> {
        let (workspace, repo) =
            parse_owner_repo_arg(args).ok_or_else(|| PluginError::Usage(Self::usage()))?;
        Ok(self.build(workspace, repo))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BitbucketOwner {
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloneLink {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BitbucketLinks {
    #[serde(default)]
    pub clone: Vec<CloneLink>,
}

/// Repository fields used for stats.
#[derive(Debug, Clone, Deserialize)]
pub struct BitbucketRepository {
    pub name: String,
    pub owner: BitbucketOwner,
    pub links: BitbucketLinks,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
}

impl BitbucketRepository {
    /// Clone URL for a protocol (`https` or `ssh`).
    pub fn clone_url(&self, protocol: &str) -> Option<&str> {
        self.links
            .clone
            .iter()
            .find(|link| link.name == protocol)
            .map(|link| link.href.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct Page {
    size: u64,
}

#[derive(Debug, Clone)]
struct Fetched {
    repository: BitbucketRepository,
    watchers: u64,
    forks: u64,
    /// `None` when the issue tracker is disabled.
    issues: Option<u64>,
    pull_requests: u64,
}

/// A Bitbucket Cloud repository and its fetched data.
pub struct BitbucketPlugin {
    client: Client,
    token: Option<String>,
    workspace: String,
    repo: String,
    api_base: String,
    fetched: Option<Fetched>,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for BitbucketPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitbucketPlugin")
            .field("has_token", &self.token.is_some())
            .field("workspace", &self.workspace)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .field("fetched", &self.fetched.is_some())
            .finish()
    }
}

impl BitbucketPlugin {
    pub fn new(workspace: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client: http::client(),
            token: None,
            workspace: workspace.into(),
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

    /// `workspace/repo`.
    pub fn repo_id(&self) -> String {
        format!("{}/{}", self.workspace, self.repo)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, suffix: &str) -> Result<T, ProviderError> {
        let url = format!(
            "{}/repositories/{}/{}{}",
            self.api_base, self.workspace, self.repo, suffix
        );
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, http::bearer(token)?);
        }
        let response = http::send(request).await?;
        http::handle_response("Bitbucket", response).await
    }

    /// `GET /repositories/{workspace}/{repo}`.
    pub async fn repository(&self) -> Result<BitbucketRepository, ProviderError> {
        self.get("").await
    }

    /// `size` of a paged collection under the repository.
    pub async fn count(&self, collection: &str) -> Result<u64, ProviderError> {
        let page: Page = self.get(&format!("/{}", collection)).await?;
        Ok(page.size)
    }
}

#[async_trait]
impl Plugin for BitbucketPlugin {
    async fn fetch(&mut self) -> Result<(), PluginError> {
        let repository = self.repository().await?;
        let watchers = self.count("watchers").await?;
        let forks = self.count("forks").await?;
        let issues = match self.count("issues").await {
            Ok(count) => Some(count),
            Err(ProviderError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        };
        let pull_requests = self.count("pullrequests").await?;
        self.fetched = Some(Fetched {
            repository,
            watchers,
            forks,
            issues,
            pull_requests,
        });
        Ok(())
    }

    fn header(&self) -> Header {
        let name = match &self.fetched {
            Some(data) => format!(
                "{}/{}",
                data.repository.owner.display_name, data.repository.name
            ),
            None => self.repo_id(),
        };
        Header::Parts(vec![name, "Bitbucket".to_string()])
    }

    fn ascii(&self) -> &str {
        ASCII
    }

    fn stats(&self) -> Vec<Stat> {
        let Some(data) = &self.fetched else {
            return Vec::new();
        };
        let repo = &data.repository;
        let mut stats = vec![
            Stat::new("HTTP(S)", repo.clone_url("https").unwrap_or_default()).with_emoji("🌐"),
            Stat::new("SSH", repo.clone_url("ssh").unwrap_or_default()).with_emoji("🔑"),
            Stat::new("subscribers", data.watchers).with_emoji("👀"),
            Stat::new("forks", data.forks).with_emoji("🔱"),
            Stat::timespan("created", repo.created_on).with_emoji("🐣"),
            Stat::timespan("updated", repo.updated_on).with_emoji("📤"),
            Stat::new("size", human_size(repo.size)).with_emoji("💽"),
        ];
        if let Some(issues) = data.issues {
            stats.push(Stat::new("issues", issues).with_emoji("❗"));
        }
        stats.push(Stat::new("pull requests", data.pull_requests).with_emoji("🔀"));

        stats
            .into_iter()
            .map(|stat| stat.with_label_styles(LABEL_STYLES))
            .collect()
    }
}
