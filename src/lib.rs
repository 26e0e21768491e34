//! pr-checkout - check out GitHub pull requests into a local repository
//!
//! Given a pull request and the remotes of the current repository, works
//! out which remote the PR targets, which remote (if any) tracks its source
//! branch, what the local branch should be called, and the exact sequence
//! of git operations that gets the working tree there.

pub mod auth;
pub mod checkout;
pub mod config;
pub mod error;
pub mod platform;
pub mod repo;
pub mod types;
