//! Running `git` commands

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Runs a single version-control command
///
/// Implementations block until the command finishes and report failure as
/// an error carrying whatever the tool exposed.
pub trait GitRunner {
    /// Run `git` with the given arguments
    fn run(&self, args: &[String]) -> Result<()>;
}

/// Runs the system `git` binary with inherited stdin/stdout/stderr
///
/// A command that cannot be started at all (missing binary, missing
/// directory) fails with `Error::GitSpawn` carrying the OS error.
#[derive(Debug, Clone, Default)]
pub struct SystemGit {
    dir: Option<PathBuf>,
}

impl SystemGit {
    /// Run commands in the current directory
    pub const fn new() -> Self {
        Self { dir: None }
    }

    /// Run commands in `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[String]) -> Result<()> {
        let command = format!("git {}", args.join(" "));
        debug!(%command, "running");

        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }

        let status = match cmd.status() {
            Ok(status) => status,
            Err(source) => {
                debug!(%command, error = %source, "failed to spawn");
                return Err(Error::GitSpawn { command, source });
            }
        };

        if status.success() {
            Ok(())
        } else {
            Err(Error::GitCommand {
                command,
                code: status.code(),
            })
        }
    }
}
