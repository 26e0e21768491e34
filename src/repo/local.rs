//! Read-only view of the local repository used for planning

use crate::error::{Error, Result};
use crate::repo::remotes::Remotes;
use crate::types::Remote;
use gix::bstr::{BStr, ByteSlice};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Facts about the working tree consulted while planning a checkout
///
/// Implementations must not change between calls made during one
/// planning pass.
pub trait LocalGitState {
    /// Short name of the checked-out branch (`None` when detached or unborn)
    fn current_branch(&self) -> Option<&str>;

    /// Whether a fully-qualified ref such as `refs/heads/main` exists
    fn ref_exists(&self, ref_name: &str) -> bool;

    /// Value of `branch.<name>.merge`, if set to something non-empty
    fn branch_merge_config(&self, branch: &str) -> Option<String>;
}

/// A git repository opened with gix
///
/// Configuration is snapshotted when the repository is opened; open a new
/// `GitRepo` to observe changes made afterwards.
pub struct GitRepo {
    repo: gix::Repository,
    current_branch: Option<String>,
}

impl GitRepo {
    /// Discover and open the repository containing `path`
    pub fn open(path: &Path) -> Result<Self> {
        let repo = gix::discover(path)
            .map_err(|e| Error::Git(format!("not a git repository ({}): {e}", path.display())))?;

        let current_branch = {
            let head = repo
                .head()
                .map_err(|e| Error::Git(format!("failed to read HEAD: {e}")))?;
            // Unborn branches have no ref yet and cannot be fetched into or merged
            if head.is_unborn() {
                None
            } else {
                head.referent_name()
                    .map(|name| name.shorten().to_str_lossy().into_owned())
            }
        };

        debug!(branch = current_branch.as_deref(), "opened repository");
        Ok(Self {
            repo,
            current_branch,
        })
    }

    /// Root of the working tree (or the git dir for bare repositories)
    pub fn workdir(&self) -> PathBuf {
        self.repo
            .workdir()
            .unwrap_or_else(|| self.repo.git_dir())
            .to_path_buf()
    }

    /// Configured remotes with their repository identity
    pub fn remotes(&self) -> Result<Remotes> {
        let mut remotes = Vec::new();
        for name in self.repo.remote_names() {
            let name: &BStr = name.as_ref();
            let remote = self
                .repo
                .find_remote(name)
                .map_err(|e| Error::Git(format!("failed to read remote {name}: {e}")))?;
            let name = name.to_str_lossy().into_owned();

            let resolved = match remote.url(gix::remote::Direction::Fetch) {
                Some(url) => Remote::from_url(name, &url.to_bstring().to_str_lossy()),
                None => Remote::new(name),
            };
            debug!(
                remote = %resolved.name,
                owner = resolved.owner_login.as_deref(),
                repo = resolved.repo_name.as_deref(),
                "found remote"
            );
            remotes.push(resolved);
        }
        Ok(Remotes::new(remotes))
    }
}

impl LocalGitState for GitRepo {
    fn current_branch(&self) -> Option<&str> {
        self.current_branch.as_deref()
    }

    fn ref_exists(&self, ref_name: &str) -> bool {
        matches!(self.repo.try_find_reference(ref_name), Ok(Some(_)))
    }

    fn branch_merge_config(&self, branch: &str) -> Option<String> {
        let key = format!("branch.{branch}.merge");
        self.repo
            .config_snapshot()
            .string(key.as_str())
            .map(|value| value.to_str_lossy().into_owned())
            .filter(|value| !value.is_empty())
    }
}
