//! providers::gitlab
//!
//! GitLab plugin using the REST API (v4).
//!
//! # Design
//!
//! Projects are addressed by their full namespaced path (nested groups are
//! allowed) or by numeric id. The identifier is percent-encoded into a single
//! path segment, as the GitLab API requires.
//!
//! `GITLAB_TOKEN` is optional and sent as `PRIVATE-TOKEN`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::{args_need_explicit_plugin, http, ProviderError, LABEL_STYLES};
use crate::git::Repository;
use crate::plugin::{Header, Plugin, PluginDescriptor, PluginError};
use crate::render::Stat;

/// Registry name of this plugin.
pub const NAME: &str = "gitlab";

/// Default GitLab API base URL.
const DEFAULT_API_BASE: &str = "https://gitlab.com/api/v4";

/// Environment variable holding the API token.
const TOKEN_VAR: &str = "GITLAB_TOKEN";

const ASCII: &str = include_str!("ascii/gitlab.ascii");

static HTTP_REMOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:[^@/]+@)?gitlab\.com/(?P<path>[\w.\-]+(?:/[\w.\-]+)+)/?$")
        .expect("gitlab http remote regex should compile")
});

static SSH_REMOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:ssh://)?git@gitlab\.com[:/](?P<path>[\w.\-]+(?:/[\w.\-]+)+)/?$")
        .expect("gitlab ssh remote regex should compile")
});

/// Parse a GitLab remote URL into the project path.
///
/// - `https://gitlab.com/group/sub/project.git` -> `Some("group/sub/project")`
/// - `git@gitlab.com:group/project.git` -> `Some("group/project")`
pub fn parse_gitlab_url(url: &str) -> Option<String> {
    let caps = HTTP_REMOTE_RE
        .captures(url)
        .or_else(|| SSH_REMOTE_RE.captures(url))?;
    let path = &caps["path"];
    let path = path.strip_suffix(".git").unwrap_or(path);
    if path.ends_with('/') || !path.contains('/') {
        return None;
    }
    Some(path.to_string())
}

/// The GitLab plugin descriptor.
#[derive(Debug, Clone)]
pub struct GitLabProvider {
    api_base: String,
}

impl Default for GitLabProvider {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl GitLabProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different API base (self-hosted instances, tests).
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    pub fn usage() -> String {
        format!(
            "Usage: repofetch --{NAME} -- NAMESPACE/PROJECT|PROJECT_ID\n\n\
             Set {TOKEN_VAR} to access private projects."
        )
    }

    fn build(&self, project: String) -> Box<dyn Plugin> {
        Box::new(
            GitLabPlugin::new(project)
                .with_api_base(self.api_base.clone())
                .with_token(http::token_from_env(TOKEN_VAR)),
        )
    }
}

impl PluginDescriptor for GitLabProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn display_name(&self) -> &str {
        "GitLab"
    }

    fn matches_repo(&self, repo: &dyn Repository) -> Result<bool, PluginError> {
        Ok(repo
            .default_remote_url()?
            .is_some_and(|url| parse_gitlab_url(&url).is_some()))
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
        let project = parse_gitlab_url(&url).ok_or_else(|| {
            PluginError::Usage(format!("remote {:?} is not a GitLab remote", url))
        })?;
        Ok(self.build(project))
    }

    fn from_args(&self, args: &[String]) -> Result<Box<dyn Plugin>, PluginError> {
        match args {
            [project] if !project.trim_matches('/').is_empty() => {
                Ok(self.build(project.trim_matches('/').to_string()))
            }
            _ => Err(PluginError::Usage(Self::usage())),
        }
    }
}

/// Project fields used for stats.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabProject {
    pub path_with_namespace: String,
    pub http_url_to_repo: String,
    pub ssh_url_to_repo: String,
    pub star_count: u64,
    pub forks_count: u64,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    /// Absent when the issue tracker is disabled.
    #[serde(default)]
    pub open_issues_count: Option<u64>,
}

#[derive(Debug, Clone)]
struct Fetched {
    project: GitLabProject,
    merge_requests: u64,
}

/// A GitLab project and its fetched data.
pub struct GitLabPlugin {
    client: Client,
    token: Option<String>,
    project: String,
    api_base: String,
    fetched: Option<Fetched>,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitLabPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabPlugin")
            .field("has_token", &self.token.is_some())
            .field("project", &self.project)
            .field("api_base", &self.api_base)
            .field("fetched", &self.fetched.is_some())
            .finish()
    }
}

impl GitLabPlugin {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            client: http::client(),
            token: None,
            project: project.into(),
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

    /// The project path or id as given.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// `{api_base}/projects/{encoded id}/{rest...}`.
    pub fn project_url(&self, rest: &[&str]) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.api_base).map_err(|e| ProviderError::ApiError {
            status: 0,
            message: format!("invalid API base {:?}: {}", self.api_base, e),
        })?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::ApiError {
                status: 0,
                message: format!("API base {:?} cannot have a path", self.api_base),
            })?
            .pop_if_empty()
            .push("projects")
            .push(&self.project)
            .extend(rest);
        Ok(url)
    }

    fn request(&self, url: Url) -> Result<reqwest::RequestBuilder, ProviderError> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.header("PRIVATE-TOKEN", http::header_value(token)?);
        }
        Ok(request)
    }

    /// `GET /projects/:id`.
    pub async fn fetch_project(&self) -> Result<GitLabProject, ProviderError> {
        let response = http::send(self.request(self.project_url(&[])?)?).await?;
        http::handle_response("GitLab", response).await
    }

    /// Number of open merge requests, from the `X-Total` header.
    pub async fn open_merge_requests(&self) -> Result<u64, ProviderError> {
        let request = self
            .request(self.project_url(&["merge_requests"])?)?
            .query(&[("state", "opened"), ("per_page", "1")]);
        let response = http::send(request).await?;
        if !response.status().is_success() {
            return Err(http::error_for_status("GitLab", response).await);
        }

        let total = response
            .headers()
            .get("X-Total")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        match total {
            Some(total) => Ok(total),
            None => {
                let page: Vec<serde_json::Value> =
                    http::handle_response("GitLab", response).await?;
                Ok(page.len() as u64)
            }
        }
    }
}

#[async_trait]
impl Plugin for GitLabPlugin {
    async fn fetch(&mut self) -> Result<(), PluginError> {
        let project = self.fetch_project().await?;
        let merge_requests = self.open_merge_requests().await?;
        self.fetched = Some(Fetched {
            project,
            merge_requests,
        });
        Ok(())
    }

    fn header(&self) -> Header {
        let name = self
            .fetched
            .as_ref()
            .map(|data| data.project.path_with_namespace.clone())
            .unwrap_or_else(|| self.project.clone());
        Header::Parts(vec![name, "GitLab".to_string()])
    }

    fn ascii(&self) -> &str {
        ASCII
    }

    fn stats(&self) -> Vec<Stat> {
        let Some(data) = &self.fetched else {
            return Vec::new();
        };
        let project = &data.project;
        let mut stats = vec![
            Stat::new("HTTP(S)", &project.http_url_to_repo).with_emoji("🌐"),
            Stat::new("SSH", &project.ssh_url_to_repo).with_emoji("🔑"),
            Stat::new("stars", project.star_count).with_emoji("⭐"),
            Stat::new("forks", project.forks_count).with_emoji("🔱"),
            Stat::timespan("created", project.created_at).with_emoji("🐣"),
            Stat::timespan("updated", project.last_activity_at).with_emoji("📤"),
        ];
        if let Some(issues) = project.open_issues_count {
            stats.push(Stat::new("issues", issues).with_emoji("❗"));
        }
        stats.push(Stat::new("merge requests", data.merge_requests).with_emoji("🔀"));

        stats
            .into_iter()
            .map(|stat| stat.with_label_styles(LABEL_STYLES))
            .collect()
    }
}
