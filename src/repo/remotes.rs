//! Remote directory and base/head remote resolution

use crate::error::{Error, Result};
use crate::types::{PullRequest, Remote};
use tracing::debug;

/// Remote names tried, in order, when picking the base remote
pub const BASE_REMOTE_PRIORITY: [&str; 3] = ["upstream", "github", "origin"];

/// Snapshot of the configured remotes
///
/// Order is preserved (it decides the fallback base remote); names are
/// unique, later duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Remotes(Vec<Remote>);

impl Remotes {
    /// Build a directory from remotes in priority order
    pub fn new(remotes: impl IntoIterator<Item = Remote>) -> Self {
        let mut unique: Vec<Remote> = Vec::new();
        for remote in remotes {
            if !unique.iter().any(|r| r.name == remote.name) {
                unique.push(remote);
            }
        }
        Self(unique)
    }

    /// Find a remote by exact name
    pub fn find_by_name(&self, name: &str) -> Option<&Remote> {
        self.0.iter().find(|r| r.name == name)
    }

    /// Find the first remote pointing at `owner/repo`
    pub fn find_by_repo(&self, owner: &str, repo: &str) -> Option<&Remote> {
        self.0.iter().find(|r| r.is_repo(owner, repo))
    }

    /// Iterate remotes in order
    pub fn iter(&self) -> std::slice::Iter<'_, Remote> {
        self.0.iter()
    }

    /// Number of remotes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no remotes are configured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Remotes {
    type Item = &'a Remote;
    type IntoIter = std::slice::Iter<'a, Remote>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Pick the remote for the repository the pull request targets.
///
/// Priority: `upstream`, `github`, `origin`, then the first remaining
/// remote. Fails only when no remotes exist.
pub fn resolve_base_remote(remotes: &Remotes) -> Result<&Remote> {
    let remote = BASE_REMOTE_PRIORITY
        .iter()
        .find_map(|name| remotes.find_by_name(name))
        .or_else(|| remotes.iter().next())
        .ok_or(Error::NoRemoteFound)?;
    debug!(remote = %remote.name, "resolved base remote");
    Ok(remote)
}

/// Pick the remote tracking the pull request's source repository.
///
/// Same-repository PRs use the base remote. Cross-repository PRs use the
/// first remote whose identity matches the head repository, or `None`
/// when no local remote tracks it.
pub fn resolve_head_remote<'a>(
    remotes: &'a Remotes,
    pr: &PullRequest,
    base_remote: &'a Remote,
) -> Option<&'a Remote> {
    if !pr.is_cross_repository {
        return Some(base_remote);
    }
    let head = remotes.find_by_repo(&pr.head_repository_owner_login, &pr.head_repository_name);
    debug!(
        owner = %pr.head_repository_owner_login,
        repo = %pr.head_repository_name,
        head_remote = head.map(|r| r.name.as_str()),
        "resolved head remote"
    );
    head
}
