//! Real git repositories in temporary directories

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// An "upstream" repository plus a clone of it to check PRs out into
///
/// Upstream starts with one commit on `main`. Pull requests are published
/// the way GitHub exposes them, as `refs/pull/<n>/head`.
pub struct TempGitRepo {
    _dir: TempDir,
    upstream: PathBuf,
    work: PathBuf,
}

impl TempGitRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let upstream = dir.path().join("upstream");
        let work = dir.path().join("work");

        fs::create_dir_all(&upstream).expect("create upstream dir");
        git(&upstream, &["init", "--initial-branch=main"]);
        commit_file(&upstream, "README.md", "hello\n", "Initial commit");

        git(
            dir.path(),
            &["clone", "--quiet", path_str(&upstream), path_str(&work)],
        );

        Self {
            _dir: dir,
            upstream,
            work,
        }
    }

    pub fn upstream(&self) -> &Path {
        &self.upstream
    }

    pub fn work(&self) -> &Path {
        &self.work
    }

    /// Create `branch` upstream with one commit and expose it as PR `number`
    pub fn publish_pull_request(&self, number: u64, branch: &str) -> String {
        git(&self.upstream, &["checkout", "--quiet", "-b", branch, "main"]);
        let sha = commit_file(
            &self.upstream,
            &format!("{branch}.txt"),
            "change\n",
            &format!("Work on {branch}"),
        );
        git(&self.upstream, &["checkout", "--quiet", "main"]);
        self.point_pull_ref(number, &sha);
        sha
    }

    /// Rewrite upstream's `refs/pull/<n>/head` to a new commit on `main`
    pub fn force_push_pull_request(&self, number: u64) -> String {
        let sha = commit_file(&self.upstream, "rewrite.txt", "rewritten\n", "Rewritten");
        self.point_pull_ref(number, &sha);
        sha
    }

    /// Commit a file in the work clone on the current branch
    pub fn commit_in_work(&self, file: &str, message: &str) -> String {
        commit_file(&self.work, file, "local\n", message)
    }

    /// Run git in the work clone and return trimmed stdout
    pub fn work_git(&self, args: &[&str]) -> String {
        git(&self.work, args)
    }

    fn point_pull_ref(&self, number: u64, sha: &str) {
        git(
            &self.upstream,
            &["update-ref", &format!("refs/pull/{number}/head"), sha],
        );
    }
}

/// Run git in `dir` with a fixed identity; panics on failure
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn commit_file(dir: &Path, file: &str, content: &str, message: &str) -> String {
    fs::write(dir.join(file), content).expect("write file");
    git(dir, &["add", file]);
    git(dir, &["commit", "--quiet", "-m", message]);
    git(dir, &["rev-parse", "HEAD"])
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}
