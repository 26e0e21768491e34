//! GitHub token discovery

use super::AuthSource;
use crate::error::{Error, Result};
use crate::types::DEFAULT_HOST;
use tokio::process::Command;
use tracing::debug;

/// Environment variables checked for github.com, in order
const GITHUB_TOKEN_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Environment variables checked for Enterprise hosts, in order
const ENTERPRISE_TOKEN_VARS: [&str; 2] = ["GH_ENTERPRISE_TOKEN", "GITHUB_ENTERPRISE_TOKEN"];

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// API token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
    /// Host the token is for
    pub host: String,
}

/// Find a token for `host` (None for github.com).
///
/// Environment variables win; otherwise ask `gh auth token`.
pub async fn get_github_auth(host: Option<&str>) -> Result<GitHubAuthConfig> {
    let host = host.unwrap_or(DEFAULT_HOST).to_string();
    let vars: &[&str] = if host == DEFAULT_HOST {
        &GITHUB_TOKEN_VARS
    } else {
        &ENTERPRISE_TOKEN_VARS
    };

    if let Some(token) = token_from_env(vars) {
        debug!(%host, "using GitHub token from environment");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
            host,
        });
    }

    let output = Command::new("gh")
        .args(["auth", "token", "--hostname", &host])
        .output()
        .await
        .map_err(|e| Error::Auth(format!("no token in environment and gh is unavailable: {e}")))?;

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !output.status.success() || token.is_empty() {
        return Err(Error::Auth(format!(
            "not logged in to {host}. Run 'gh auth login' or set {}",
            vars.join(" / ")
        )));
    }

    debug!(%host, "using GitHub token from gh CLI");
    Ok(GitHubAuthConfig {
        token,
        source: AuthSource::Cli,
        host,
    })
}

fn token_from_env(vars: &[&str]) -> Option<String> {
    vars.iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
