//! Core types for pr-checkout

use serde::{Deserialize, Serialize};

/// Host used when a repository does not name one explicitly
pub const DEFAULT_HOST: &str = "github.com";

/// A configured git remote
///
/// The repository identity is only known when the remote URL could be
/// parsed; remotes pointing at local paths or unusual hosts keep it unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remote {
    /// Remote name (e.g., "origin")
    pub name: String,
    /// Owner of the repository the remote points at
    pub owner_login: Option<String>,
    /// Name of the repository the remote points at
    pub repo_name: Option<String>,
    /// Host of the remote URL (e.g., "github.com")
    pub host: Option<String>,
}

impl Remote {
    /// Create a remote with no known repository identity
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_login: None,
            repo_name: None,
            host: None,
        }
    }

    /// Create a remote pointing at `owner/repo` on the default host
    pub fn with_repo(name: impl Into<String>, owner: &str, repo: &str) -> Self {
        Self {
            name: name.into(),
            owner_login: Some(owner.to_string()),
            repo_name: Some(repo.to_string()),
            host: Some(DEFAULT_HOST.to_string()),
        }
    }

    /// Create a remote from its URL, filling in the identity when parseable
    pub fn from_url(name: impl Into<String>, url: &str) -> Self {
        let name = name.into();
        match crate::platform::parse_repo_info(url) {
            Ok(config) => Self {
                name,
                host: Some(config.host_or_default().to_string()),
                owner_login: Some(config.owner),
                repo_name: Some(config.repo),
            },
            Err(_) => Self::new(name),
        }
    }

    /// Whether this remote points at `owner/repo` (case-insensitive)
    pub fn is_repo(&self, owner: &str, repo: &str) -> bool {
        matches!(
            (&self.owner_login, &self.repo_name),
            (Some(o), Some(r)) if o.eq_ignore_ascii_case(owner) && r.eq_ignore_ascii_case(repo)
        )
    }

    /// Repository identity of this remote, if known
    pub fn platform_config(&self) -> Option<PlatformConfig> {
        let owner = self.owner_login.clone()?;
        let repo = self.repo_name.clone()?;
        let host = self.host.clone().filter(|h| h != DEFAULT_HOST);
        Some(PlatformConfig { owner, repo, host })
    }
}

/// A pull request, as needed to plan a checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR title (for display)
    pub title: String,
    /// Web URL for the PR
    pub url: String,
    /// Head branch name in the head repository
    pub head_ref_name: String,
    /// Owner of the head repository
    pub head_repository_owner_login: String,
    /// Name of the head repository
    pub head_repository_name: String,
    /// Default branch of the head repository
    pub head_repository_default_branch: String,
    /// Whether head and base live in different repositories
    pub is_cross_repository: bool,
    /// Whether the author lets maintainers push to the head branch
    pub maintainer_can_modify: bool,
}

impl PullRequest {
    /// Synthetic ref the host exposes for this PR's head commit
    pub fn pull_ref(&self) -> String {
        format!("refs/pull/{}/head", self.number)
    }
}

/// Repository coordinates on a GitHub host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

impl PlatformConfig {
    /// Host name, falling back to github.com
    pub fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }
}

impl std::fmt::Display for PlatformConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.host {
            Some(host) => write!(f, "{host}/{}/{}", self.owner, self.repo),
            None => write!(f, "{}/{}", self.owner, self.repo),
        }
    }
}

/// How the user identified the pull request to check out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrSelector {
    /// A bare number, e.g. `42` or `#42`
    Number(u64),
    /// A web URL; carries the repository it points into
    Url {
        /// Repository named by the URL
        repo: PlatformConfig,
        /// PR number from the URL
        number: u64,
    },
    /// A head branch name, optionally qualified as `owner:branch`
    Branch {
        /// Head repository owner, when qualified
        owner: Option<String>,
        /// Head branch name
        name: String,
    },
}

impl std::fmt::Display for PrSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => write!(f, "#{number}"),
            Self::Url { repo, number } => write!(f, "{repo}#{number}"),
            Self::Branch {
                owner: Some(owner),
                name,
            } => write!(f, "{owner}:{name}"),
            Self::Branch { owner: None, name } => write!(f, "{name}"),
        }
    }
}
