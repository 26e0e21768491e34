//! Shared fixtures for pr-checkout tests

#![allow(dead_code)]

mod mock_platform;
mod temp_repo;

pub use mock_platform::{FindBranchCall, MockPlatformService};
pub use temp_repo::{TempGitRepo, git};

use pr_checkout::checkout::GitOperation;
use pr_checkout::error::{Error, Result};
use pr_checkout::repo::{GitRunner, LocalGitState, Remotes};
use pr_checkout::types::{PlatformConfig, PullRequest, Remote};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Platform config for `acme/repo` on github.com
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "acme".to_string(),
        repo: "repo".to_string(),
        host: None,
    }
}

/// Same-repository PR from `acme/repo`
pub fn make_pr(number: u64, head_ref: &str) -> PullRequest {
    PullRequest {
        number,
        title: format!("PR for {head_ref}"),
        url: format!("https://github.com/acme/repo/pull/{number}"),
        head_ref_name: head_ref.to_string(),
        head_repository_owner_login: "acme".to_string(),
        head_repository_name: "repo".to_string(),
        head_repository_default_branch: "main".to_string(),
        is_cross_repository: false,
        maintainer_can_modify: false,
    }
}

/// PR from a fork `owner/repo` into `acme/repo`
pub fn make_fork_pr(number: u64, owner: &str, head_ref: &str) -> PullRequest {
    PullRequest {
        head_repository_owner_login: owner.to_string(),
        is_cross_repository: true,
        ..make_pr(number, head_ref)
    }
}

/// Remotes from `(name, Some((owner, repo)))` pairs
pub fn make_remotes(specs: &[(&str, Option<(&str, &str)>)]) -> Remotes {
    Remotes::new(specs.iter().map(|(name, repo)| match repo {
        Some((owner, repo)) => Remote::with_repo(*name, owner, repo),
        None => Remote::new(*name),
    }))
}

/// In-memory `LocalGitState`
///
/// `apply` mimics what each operation does to a real repository, so plans
/// can be replayed to test re-runs.
#[derive(Debug, Clone, Default)]
pub struct FakeLocalState {
    pub current_branch: Option<String>,
    pub refs: HashSet<String>,
    pub branch_config: HashMap<(String, String), String>,
}

impl FakeLocalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local state with `branch` existing and checked out
    pub fn on_branch(branch: &str) -> Self {
        Self::new().with_branch(branch).checked_out(branch)
    }

    pub fn with_branch(mut self, branch: &str) -> Self {
        self.refs.insert(format!("refs/heads/{branch}"));
        self
    }

    pub fn checked_out(mut self, branch: &str) -> Self {
        self.current_branch = Some(branch.to_string());
        self
    }

    pub fn with_config(mut self, branch: &str, key: &str, value: &str) -> Self {
        self.branch_config
            .insert((branch.to_string(), key.to_string()), value.to_string());
        self
    }

    pub fn config(&self, branch: &str, key: &str) -> Option<&str> {
        self.branch_config
            .get(&(branch.to_string(), key.to_string()))
            .map(String::as_str)
    }

    /// Apply the effect of `op` as git would
    pub fn apply(&mut self, op: &GitOperation) {
        match op {
            GitOperation::Fetch { refspec, .. } => {
                if let Some((_, dst)) = refspec.trim_start_matches('+').split_once(':') {
                    let full = if dst.starts_with("refs/") {
                        dst.to_string()
                    } else {
                        format!("refs/heads/{dst}")
                    };
                    self.refs.insert(full);
                }
            }
            GitOperation::CheckoutExisting { branch } => {
                self.current_branch = Some(branch.clone());
            }
            GitOperation::CheckoutNewTracking { branch, .. } => {
                self.refs.insert(format!("refs/heads/{branch}"));
                self.current_branch = Some(branch.clone());
            }
            GitOperation::MergeFastForward { .. } => {}
            GitOperation::SetBranchConfig { branch, key, value } => {
                self.branch_config
                    .insert((branch.clone(), key.clone()), value.clone());
            }
        }
    }

    /// Apply every operation in order
    pub fn apply_all(&mut self, ops: &[GitOperation]) {
        for op in ops {
            self.apply(op);
        }
    }
}

impl LocalGitState for FakeLocalState {
    fn current_branch(&self) -> Option<&str> {
        self.current_branch.as_deref()
    }

    fn ref_exists(&self, ref_name: &str) -> bool {
        self.refs.contains(ref_name)
    }

    fn branch_merge_config(&self, branch: &str) -> Option<String> {
        self.config(branch, "merge")
            .filter(|v| !v.is_empty())
            .map(ToString::to_string)
    }
}

/// `GitRunner` that records invocations instead of running git
#[derive(Default)]
pub struct RecordingGitRunner {
    calls: Mutex<Vec<Vec<String>>>,
    fail_on: Mutex<Option<(String, i32)>>,
}

impl RecordingGitRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail (with `code`) the first time a `git <subcommand>` runs
    pub fn fail_on(&self, subcommand: &str, code: i32) {
        *self.fail_on.lock().unwrap() = Some((subcommand.to_string(), code));
    }

    /// All invocations, including the failing one
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Invocations rendered as command lines
    pub fn command_lines(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|args| format!("git {}", args.join(" ")))
            .collect()
    }
}

impl GitRunner for RecordingGitRunner {
    fn run(&self, args: &[String]) -> Result<()> {
        self.calls.lock().unwrap().push(args.to_vec());

        let fail_on = self.fail_on.lock().unwrap().clone();
        match fail_on {
            Some((subcommand, code)) if args.first() == Some(&subcommand) => {
                Err(Error::GitCommand {
                    command: format!("git {}", args.join(" ")),
                    code: Some(code),
                })
            }
            _ => Ok(()),
        }
    }
}
