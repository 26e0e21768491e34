//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{PlatformConfig, PullRequest};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Fields shared by both pull request queries
const PULL_REQUEST_FIELDS: &str = r"
    number
    title
    url
    headRefName
    isCrossRepository
    maintainerCanModify
    headRepositoryOwner { login }
    headRepository { name defaultBranchRef { name } }
";

/// Open PRs considered when searching by head branch
const BRANCH_SEARCH_LIMIT: u32 = 30;

// GraphQL response types

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Deserialize)]
struct RepositoryData<T> {
    repository: Option<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestByNumber {
    pull_request: Option<GraphQlPullRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestsByBranch {
    pull_requests: PullRequestConnection,
}

#[derive(Deserialize)]
struct PullRequestConnection {
    nodes: Vec<GraphQlPullRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlPullRequest {
    number: u64,
    title: String,
    url: String,
    head_ref_name: String,
    is_cross_repository: bool,
    maintainer_can_modify: bool,
    head_repository_owner: Option<GraphQlOwner>,
    head_repository: Option<GraphQlRepository>,
}

#[derive(Deserialize)]
struct GraphQlOwner {
    login: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRepository {
    name: String,
    default_branch_ref: Option<GraphQlRef>,
}

#[derive(Deserialize)]
struct GraphQlRef {
    name: String,
}

impl GraphQlPullRequest {
    fn owner_login(&self) -> Option<&str> {
        self.head_repository_owner.as_ref().map(|o| o.login.as_str())
    }
}

impl TryFrom<GraphQlPullRequest> for PullRequest {
    type Error = Error;

    fn try_from(pr: GraphQlPullRequest) -> Result<Self> {
        let (Some(owner), Some(repo)) = (pr.head_repository_owner, pr.head_repository) else {
            return Err(Error::HeadRepositoryMissing(pr.number));
        };
        Ok(Self {
            number: pr.number,
            title: pr.title,
            url: pr.url,
            head_ref_name: pr.head_ref_name,
            head_repository_owner_login: owner.login,
            head_repository_name: repo.name,
            head_repository_default_branch: repo
                .default_branch_ref
                .map(|r| r.name)
                .unwrap_or_default(),
            is_cross_repository: pr.is_cross_repository,
            maintainer_can_modify: pr.maintainer_can_modify,
        })
    }
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        // GraphQL lives at /api/graphql on Enterprise hosts
        let api_base = host.as_ref().map_or_else(
            || "https://api.github.com".to_string(),
            |h| format!("https://{h}/api"),
        );
        Self::with_api_base(token, PlatformConfig { owner, repo, host }, &api_base)
    }

    /// Create a service talking to an explicit API base URL
    pub fn with_api_base(token: &str, config: PlatformConfig, api_base: &str) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base)
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Run a repository-scoped query and unwrap the GraphQL envelope
    async fn query_repository<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
        not_found: &str,
    ) -> Result<T> {
        let response: GraphQlResponse<RepositoryData<T>> = self
            .client
            .graphql(&serde_json::json!({
                "query": query,
                "variables": variables,
            }))
            .await?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            if errors
                .iter()
                .any(|e| e.kind.as_deref() == Some("NOT_FOUND"))
            {
                return Err(Error::PullRequestNotFound(not_found.to_string()));
            }
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GitHubApi(format!(
                "GraphQL error: {}",
                messages.join(", ")
            )));
        }

        response
            .data
            .ok_or_else(|| Error::GitHubApi("No data in GraphQL response".to_string()))?
            .repository
            .ok_or_else(|| Error::PullRequestNotFound(format!("repository {}", self.config)))
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest> {
        debug!(pr_number = number, "getting pull request");
        let query = format!(
            "query PullRequestByNumber($owner: String!, $repo: String!, $number: Int!) {{
                repository(owner: $owner, name: $repo) {{
                    pullRequest(number: $number) {{ {PULL_REQUEST_FIELDS} }}
                }}
            }}"
        );
        let not_found = format!("#{number} in {}", self.config);

        let data: PullRequestByNumber = self
            .query_repository(
                &query,
                serde_json::json!({
                    "owner": self.config.owner,
                    "repo": self.config.repo,
                    "number": number,
                }),
                &not_found,
            )
            .await?;

        let pr = data
            .pull_request
            .ok_or(Error::PullRequestNotFound(not_found))?;
        debug!(pr_number = number, head = %pr.head_ref_name, "got pull request");
        pr.try_into()
    }

    async fn find_pull_request_for_branch(
        &self,
        branch: &str,
        owner: Option<&str>,
    ) -> Result<PullRequest> {
        debug!(branch, owner, "finding pull request for branch");
        let query = format!(
            "query PullRequestsByBranch($owner: String!, $repo: String!, $branch: String!, $limit: Int!) {{
                repository(owner: $owner, name: $repo) {{
                    pullRequests(headRefName: $branch, states: OPEN, first: $limit) {{
                        nodes {{ {PULL_REQUEST_FIELDS} }}
                    }}
                }}
            }}"
        );
        let not_found = format!(
            "no open pull request for branch '{branch}' in {}",
            self.config
        );

        let data: PullRequestsByBranch = self
            .query_repository(
                &query,
                serde_json::json!({
                    "owner": self.config.owner,
                    "repo": self.config.repo,
                    "branch": branch,
                    "limit": BRANCH_SEARCH_LIMIT,
                }),
                &not_found,
            )
            .await?;

        let mut matches: Vec<GraphQlPullRequest> = data
            .pull_requests
            .nodes
            .into_iter()
            .filter(|pr| pr.head_ref_name == branch)
            .filter(|pr| {
                owner.is_none_or(|o| pr.owner_login().is_some_and(|l| l.eq_ignore_ascii_case(o)))
            })
            .collect();

        debug!(branch, count = matches.len(), "matched pull requests");
        match matches.len() {
            0 => Err(Error::PullRequestNotFound(not_found)),
            1 => matches.remove(0).try_into(),
            count => Err(Error::AmbiguousPullRequest {
                branch: branch.to_string(),
                count,
            }),
        }
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
