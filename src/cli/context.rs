//! Shared command context
//!
//! Gathers everything the checkout command reads before planning.

use pr_checkout::config::{UserConfig, load_user_config};
use pr_checkout::error::Result;
use pr_checkout::platform::lookup_repository;
use pr_checkout::repo::{GitRepo, Remotes, resolve_base_remote};
use pr_checkout::types::{PlatformConfig, PrSelector, Remote};
use std::path::{Path, PathBuf};

/// Environment variable naming the default GitHub host
const HOST_ENV_VAR: &str = "GH_HOST";

/// Shared context for commands that plan against the local repository
///
/// Holds a fresh snapshot: remotes and local state are re-read on every
/// invocation, nothing is cached between runs.
pub struct CommandContext {
    /// The opened repository
    pub repo: GitRepo,
    /// Root path of the working tree
    pub workdir: PathBuf,
    /// Configured remotes
    pub remotes: Remotes,
    /// Remote the pull request is expected to target
    pub base_remote: Remote,
    /// User configuration
    pub config: UserConfig,
    /// GitHub host used when input does not name one
    pub default_host: String,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// - Open repository
    /// - Load user config
    /// - Read remotes and resolve the base remote
    /// - Resolve the default host
    pub fn new(path: &Path) -> Result<Self> {
        let repo = GitRepo::open(path)?;
        let workdir = repo.workdir();
        let config = load_user_config()?;

        let remotes = repo.remotes()?;
        let base_remote = resolve_base_remote(&remotes)?.clone();

        let env_host = std::env::var(HOST_ENV_VAR).ok();
        let default_host = config.resolve_host(env_host.as_deref(), base_remote.host.as_deref());

        Ok(Self {
            repo,
            workdir,
            remotes,
            base_remote,
            config,
            default_host,
        })
    }

    /// Repository to look the pull request up in
    ///
    /// A URL selector names its own repository; otherwise the `--repo`
    /// override wins over the base remote.
    pub fn lookup_repo(
        &self,
        selector: &PrSelector,
        repo_override: Option<&str>,
    ) -> Result<PlatformConfig> {
        lookup_repository(selector, repo_override, &self.base_remote, &self.default_host)
    }
}
