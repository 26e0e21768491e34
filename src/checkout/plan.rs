//! Checkout planning - pure functions for creating checkout plans
//!
//! This module contains the pure, testable logic for deciding which git
//! operations bring the working tree to a pull request's head. No I/O
//! happens here - remotes, PR metadata and local state are passed in.

use crate::error::Result;
use crate::repo::{LocalGitState, Remotes, resolve_base_remote, resolve_head_remote};
use crate::types::{PullRequest, Remote};
use tracing::debug;

/// A single git operation in a checkout plan
///
/// Order within a plan matters: later operations rely on the effects of
/// earlier ones (a fetch before the checkout that reads its result).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitOperation {
    /// Fetch `refspec` from `remote`
    Fetch {
        /// Remote name or URL
        remote: String,
        /// Refspec to fetch
        refspec: String,
    },
    /// Switch to a branch that already exists locally
    CheckoutExisting {
        /// Local branch name
        branch: String,
    },
    /// Create a branch from `source_ref` without upstream tracking, and switch to it
    CheckoutNewTracking {
        /// Local branch name
        branch: String,
        /// Start point, e.g. `origin/feature`
        source_ref: String,
    },
    /// Fast-forward the current branch to `git_ref`, failing if it diverged
    MergeFastForward {
        /// Ref to merge
        git_ref: String,
    },
    /// Set `branch.<branch>.<key>` to `value`
    SetBranchConfig {
        /// Local branch name
        branch: String,
        /// Config key within the branch section (`remote`, `merge`)
        key: String,
        /// Value to store
        value: String,
    },
}

impl GitOperation {
    /// Arguments for the single `git` invocation performing this operation
    pub fn to_git_args(&self) -> Vec<String> {
        match self {
            Self::Fetch { remote, refspec } => {
                vec!["fetch".into(), remote.clone(), refspec.clone()]
            }
            Self::CheckoutExisting { branch } => vec!["checkout".into(), branch.clone()],
            Self::CheckoutNewTracking { branch, source_ref } => vec![
                "checkout".into(),
                "-b".into(),
                branch.clone(),
                "--no-track".into(),
                source_ref.clone(),
            ],
            Self::MergeFastForward { git_ref } => {
                vec!["merge".into(), "--ff-only".into(), git_ref.clone()]
            }
            Self::SetBranchConfig { branch, key, value } => vec![
                "config".into(),
                format!("branch.{branch}.{key}"),
                value.clone(),
            ],
        }
    }

    fn set_config(branch: &str, key: &str, value: impl Into<String>) -> Self {
        Self::SetBranchConfig {
            branch: branch.to_string(),
            key: key.to_string(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for GitOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch { remote, refspec } => write!(f, "fetch {refspec} from {remote}"),
            Self::CheckoutExisting { branch } => write!(f, "switch to {branch}"),
            Self::CheckoutNewTracking { branch, source_ref } => {
                write!(f, "create {branch} from {source_ref}")
            }
            Self::MergeFastForward { git_ref } => write!(f, "fast-forward to {git_ref}"),
            Self::SetBranchConfig { branch, key, value } => {
                write!(f, "set branch.{branch}.{key} = {value}")
            }
        }
    }
}

/// Checkout plan - the functional core output
///
/// Created by `create_checkout_plan()` (pure) and executed by
/// `execute_checkout()` (effectful).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPlan {
    /// Remote the pull request targets
    pub base_remote: String,
    /// Remote tracking the PR's source repository, if any
    pub head_remote: Option<String>,
    /// Local branch the PR will be checked out to
    pub branch_name: String,
    /// Ordered operations to perform
    pub steps: Vec<GitOperation>,
}

impl CheckoutPlan {
    /// Check if the plan has no operations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of operations
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

/// Remotes and branch name a checkout has been resolved to
#[derive(Debug, Clone, Copy)]
pub struct CheckoutTarget<'a> {
    /// Remote the pull request targets
    pub base_remote: &'a Remote,
    /// Remote tracking the PR's source repository, if any
    pub head_remote: Option<&'a Remote>,
    /// Local branch name, from `choose_branch_name()`
    pub branch_name: &'a str,
}

/// Decide the local branch name for a pull request.
///
/// Uses the head branch name, except when no remote tracks the head
/// repository and the head branch is that repository's default branch:
/// checking out someone's `main` becomes `<owner>/main` so it cannot
/// collide with the local `main`.
pub fn choose_branch_name(pr: &PullRequest, head_remote_exists: bool) -> String {
    if !head_remote_exists && pr.head_ref_name == pr.head_repository_default_branch {
        format!("{}/{}", pr.head_repository_owner_login, pr.head_ref_name)
    } else {
        pr.head_ref_name.clone()
    }
}

/// Plan the git operations for an already-resolved checkout (PURE)
///
/// `host` is used to build the push URL when the author allows
/// maintainer edits and no local remote tracks their fork.
pub fn plan_operations(
    target: &CheckoutTarget<'_>,
    pr: &PullRequest,
    local: &dyn LocalGitState,
    host: &str,
) -> Vec<GitOperation> {
    match target.head_remote {
        Some(head_remote) => plan_from_head_remote(head_remote, target.branch_name, pr, local),
        None => plan_from_pull_ref(target.base_remote, target.branch_name, pr, local, host),
    }
}

fn plan_from_head_remote(
    head_remote: &Remote,
    branch: &str,
    pr: &PullRequest,
    local: &dyn LocalGitState,
) -> Vec<GitOperation> {
    let head_ref = &pr.head_ref_name;
    let remote_branch = format!("{}/{head_ref}", head_remote.name);
    let tracking_ref = format!("refs/remotes/{remote_branch}");

    let mut steps = vec![GitOperation::Fetch {
        remote: head_remote.name.clone(),
        refspec: format!("+refs/heads/{head_ref}:{tracking_ref}"),
    }];

    if local.ref_exists(&format!("refs/heads/{branch}")) {
        debug!(branch, "local branch exists, fast-forwarding");
        steps.push(GitOperation::CheckoutExisting {
            branch: branch.to_string(),
        });
        steps.push(GitOperation::MergeFastForward {
            git_ref: tracking_ref,
        });
    } else {
        debug!(branch, "creating local branch from remote-tracking ref");
        steps.push(GitOperation::CheckoutNewTracking {
            branch: branch.to_string(),
            source_ref: remote_branch,
        });
        steps.push(GitOperation::set_config(branch, "remote", &head_remote.name));
        steps.push(GitOperation::set_config(
            branch,
            "merge",
            format!("refs/heads/{head_ref}"),
        ));
    }

    steps
}

fn plan_from_pull_ref(
    base_remote: &Remote,
    branch: &str,
    pr: &PullRequest,
    local: &dyn LocalGitState,
    host: &str,
) -> Vec<GitOperation> {
    let pull_ref = pr.pull_ref();
    let mut steps = Vec::new();

    if local.current_branch() == Some(branch) {
        debug!(branch, "already on branch, fast-forwarding from pull ref");
        steps.push(GitOperation::Fetch {
            remote: base_remote.name.clone(),
            refspec: pull_ref.clone(),
        });
        steps.push(GitOperation::MergeFastForward {
            git_ref: "FETCH_HEAD".to_string(),
        });
    } else {
        debug!(branch, "fetching pull ref into local branch");
        steps.push(GitOperation::Fetch {
            remote: base_remote.name.clone(),
            refspec: format!("{pull_ref}:{branch}"),
        });
        steps.push(GitOperation::CheckoutExisting {
            branch: branch.to_string(),
        });
    }

    // Never overwrite tracking a previous run or the user already set up
    if local.branch_merge_config(branch).is_none() {
        let (remote, merge_ref) = if pr.maintainer_can_modify {
            (
                format!(
                    "https://{host}/{}/{}.git",
                    pr.head_repository_owner_login, pr.head_repository_name
                ),
                format!("refs/heads/{}", pr.head_ref_name),
            )
        } else {
            (base_remote.name.clone(), pull_ref)
        };
        steps.push(GitOperation::set_config(branch, "remote", remote));
        steps.push(GitOperation::set_config(branch, "merge", merge_ref));
    }

    steps
}

/// Create a checkout plan (PURE - no I/O, easily testable)
///
/// Resolves the base and head remotes, chooses the branch name, and plans
/// the operations. The result depends only on the arguments.
///
/// # Arguments
/// * `remotes` - Configured remotes, in priority order
/// * `pr` - Pull request metadata
/// * `local` - Current working-tree state
/// * `host` - GitHub host, used for maintainer push URLs
pub fn create_checkout_plan(
    remotes: &Remotes,
    pr: &PullRequest,
    local: &dyn LocalGitState,
    host: &str,
) -> Result<CheckoutPlan> {
    let base_remote = resolve_base_remote(remotes)?;
    let head_remote = resolve_head_remote(remotes, pr, base_remote);
    let branch_name = choose_branch_name(pr, head_remote.is_some());

    let target = CheckoutTarget {
        base_remote,
        head_remote,
        branch_name: &branch_name,
    };
    let steps = plan_operations(&target, pr, local, host);
    debug!(
        pr_number = pr.number,
        branch = %branch_name,
        steps = steps.len(),
        "created checkout plan"
    );

    Ok(CheckoutPlan {
        base_remote: base_remote.name.clone(),
        head_remote: head_remote.map(|r| r.name.clone()),
        branch_name,
        steps,
    })
}
