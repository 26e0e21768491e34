//! Local repository access: remotes, working-tree state, and git commands

mod local;
mod remotes;
mod runner;

pub use local::{GitRepo, LocalGitState};
pub use remotes::{BASE_REMOTE_PRIORITY, Remotes, resolve_base_remote, resolve_head_remote};
pub use runner::{GitRunner, SystemGit};
