//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use pr_checkout::error::{Error, Result};
use pr_checkout::platform::PlatformService;
use pr_checkout::types::{PlatformConfig, PullRequest};
use std::collections::HashMap;
use std::sync::Mutex;

/// Call record for `find_pull_request_for_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindBranchCall {
    pub branch: String,
    pub owner: Option<String>,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Configurable responses per number and per head branch
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    by_number: Mutex<HashMap<u64, PullRequest>>,
    by_branch: Mutex<Vec<PullRequest>>,
    // Call tracking
    get_calls: Mutex<Vec<u64>>,
    find_branch_calls: Mutex<Vec<FindBranchCall>>,
    // Error injection
    error_on_lookup: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            by_number: Mutex::new(HashMap::new()),
            by_branch: Mutex::new(Vec::new()),
            get_calls: Mutex::new(Vec::new()),
            find_branch_calls: Mutex::new(Vec::new()),
            error_on_lookup: Mutex::new(None),
        }
    }

    /// Register a PR, reachable by number and by head branch
    pub fn add_pr(&self, pr: PullRequest) {
        self.by_number.lock().unwrap().insert(pr.number, pr.clone());
        self.by_branch.lock().unwrap().push(pr);
    }

    /// Make every lookup return a platform error
    pub fn fail_lookup(&self, msg: &str) {
        *self.error_on_lookup.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Get all numbers `get_pull_request` was called with
    pub fn get_calls(&self) -> Vec<u64> {
        self.get_calls.lock().unwrap().clone()
    }

    /// Get all `find_pull_request_for_branch` calls
    pub fn find_branch_calls(&self) -> Vec<FindBranchCall> {
        self.find_branch_calls.lock().unwrap().clone()
    }

    fn injected_error(&self) -> Option<Error> {
        self.error_on_lookup
            .lock()
            .unwrap()
            .as_ref()
            .map(|msg| Error::GitHubApi(msg.clone()))
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest> {
        self.get_calls.lock().unwrap().push(number);

        if let Some(e) = self.injected_error() {
            return Err(e);
        }

        self.by_number
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .ok_or_else(|| Error::PullRequestNotFound(format!("#{number}")))
    }

    async fn find_pull_request_for_branch(
        &self,
        branch: &str,
        owner: Option<&str>,
    ) -> Result<PullRequest> {
        self.find_branch_calls.lock().unwrap().push(FindBranchCall {
            branch: branch.to_string(),
            owner: owner.map(ToString::to_string),
        });

        if let Some(e) = self.injected_error() {
            return Err(e);
        }

        let prs = self.by_branch.lock().unwrap();
        let matches: Vec<&PullRequest> = prs
            .iter()
            .filter(|pr| pr.head_ref_name == branch)
            .filter(|pr| owner.is_none_or(|o| pr.head_repository_owner_login == o))
            .collect();

        match matches.as_slice() {
            [] => Err(Error::PullRequestNotFound(branch.to_string())),
            [pr] => Ok((*pr).clone()),
            many => Err(Error::AmbiguousPullRequest {
                branch: branch.to_string(),
                count: many.len(),
            }),
        }
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
