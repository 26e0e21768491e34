//! Platform services for pull request metadata
//!
//! Provides the lookup interface the checkout command plans against.

mod detection;
mod factory;
mod github;

pub use detection::{lookup_repository, parse_pr_selector, parse_repo_arg, parse_repo_info};
pub use factory::create_platform_service;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{PlatformConfig, PrSelector, PullRequest};
use async_trait::async_trait;
use tracing::debug;

/// Platform service trait for pull request lookups
///
/// Implementations return the whole `PullRequest` record or fail; the
/// checkout planner never asks for more later.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Look up a pull request by number
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest>;

    /// Find the open pull request whose head is `branch`
    ///
    /// When `owner` is given only PRs from that owner's repository match.
    async fn find_pull_request_for_branch(
        &self,
        branch: &str,
        owner: Option<&str>,
    ) -> Result<PullRequest>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}

/// Resolve a selector to a pull request using `platform`
///
/// URL selectors are looked up by number; the caller is expected to have
/// created `platform` for the repository the URL names.
pub async fn fetch_pull_request(
    platform: &dyn PlatformService,
    selector: &PrSelector,
) -> Result<PullRequest> {
    debug!(%selector, repo = %platform.config(), "fetching pull request");
    match selector {
        PrSelector::Number(number) | PrSelector::Url { number, .. } => {
            platform.get_pull_request(*number).await
        }
        PrSelector::Branch { owner, name } => {
            platform
                .find_pull_request_for_branch(name, owner.as_deref())
                .await
        }
    }
}
