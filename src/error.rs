//! Error types for pr-checkout

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving, planning, or executing a checkout
#[derive(Debug, Error)]
pub enum Error {
    /// The working tree has no configured remotes at all
    #[error("no git remotes found")]
    NoRemoteFound,

    /// A remote or repository URL could not be mapped to owner/repo
    #[error("unrecognized repository URL: {0}")]
    UnrecognizedRemoteUrl(String),

    /// The local repository could not be opened or read
    #[error("git error: {0}")]
    Git(String),

    /// A `git` invocation exited non-zero or was killed
    #[error("`{command}` failed{}", exit_suffix(.code))]
    GitCommand {
        /// The command line that was run
        command: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
    },

    /// `git` could not be started at all
    #[error("`{command}` could not be started: {source}")]
    GitSpawn {
        /// The command line that was attempted
        command: String,
        /// Why the process could not be spawned
        #[source]
        source: std::io::Error,
    },

    /// GitHub responded with an error or an unexpected payload
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Transport-level failure from the GitHub client
    #[error("GitHub API error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// No usable credentials
    #[error("authentication error: {0}")]
    Auth(String),

    /// The user config file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// No pull request matched the given selector
    #[error("pull request not found: {0}")]
    PullRequestNotFound(String),

    /// More than one open pull request uses the given head branch
    #[error("{count} open pull requests use head branch '{branch}'; use <owner>:<branch> or a number")]
    AmbiguousPullRequest {
        /// Head branch that was searched for
        branch: String,
        /// Number of matching pull requests
        count: usize,
    },

    /// The pull request's source repository no longer exists
    #[error("head repository of pull request #{0} no longer exists")]
    HeadRepositoryMissing(u64),

    /// Malformed user input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

fn exit_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" with exit code {c}")).unwrap_or_default()
}
