//! User configuration
//!
//! Read from `<config_dir>/pr-checkout/config.toml`. Every setting is
//! optional; a missing file means defaults.

mod storage;

pub use storage::{config_path, load_config, load_user_config};

use crate::types::DEFAULT_HOST;
use serde::{Deserialize, Serialize};

/// Parsed user configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// GitHub settings
    pub github: GitHubSettings,
    /// Checkout command defaults
    pub checkout: CheckoutSettings,
}

/// `[github]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    /// GitHub host (e.g. an Enterprise server)
    pub host: Option<String>,
}

/// `[checkout]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutSettings {
    /// Preview the plan and ask before running it
    pub confirm: bool,
}

impl UserConfig {
    /// Pick the GitHub host.
    ///
    /// Precedence: config file, then `env_host` (`GH_HOST`), then the host
    /// of the base remote, then github.com.
    pub fn resolve_host(&self, env_host: Option<&str>, remote_host: Option<&str>) -> String {
        self.github
            .host
            .as_deref()
            .or(env_host)
            .or(remote_host)
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_HOST)
            .to_string()
    }
}
