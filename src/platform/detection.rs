//! Repository and pull request identification from user input and remote URLs

use crate::error::{Error, Result};
use crate::types::{DEFAULT_HOST, PlatformConfig, PrSelector, Remote};
use regex::Regex;
use url::Url;

/// Pull request path within a repository URL: `/<owner>/<repo>/pull/<n>`
const PR_PATH_PATTERN: &str = r"^/([^/]+)/([^/]+)/pull/(\d+)";

/// Parse a git remote URL into repository coordinates.
///
/// Accepts `https://`, `http://`, `ssh://`, `git://` URLs and the scp-like
/// `git@host:owner/repo.git` form. The `.git` suffix and trailing slashes
/// are ignored. github.com (and its `ssh.` / `www.` aliases) map to
/// `host: None`.
pub fn parse_repo_info(url: &str) -> Result<PlatformConfig> {
    let trimmed = url.trim().trim_end_matches('/');
    let unrecognized = || Error::UnrecognizedRemoteUrl(url.to_string());

    let (host, path) = if trimmed.contains("://") {
        let parsed = Url::parse(trimmed).map_err(|_| unrecognized())?;
        if !matches!(parsed.scheme(), "https" | "http" | "ssh" | "git" | "git+ssh") {
            return Err(unrecognized());
        }
        let host = parsed.host_str().ok_or_else(unrecognized)?.to_string();
        (host, parsed.path().to_string())
    } else {
        // scp-like: [user@]host:owner/repo
        let (authority, path) = trimmed.split_once(':').ok_or_else(unrecognized)?;
        if authority.contains('/') || path.starts_with("//") {
            return Err(unrecognized());
        }
        let host = authority.rsplit('@').next().unwrap_or(authority).to_string();
        (host, path.to_string())
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let mut parts = path.split('/');
    let (Some(owner), Some(repo), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(unrecognized());
    };
    if host.is_empty() || owner.is_empty() || repo.is_empty() {
        return Err(unrecognized());
    }

    Ok(PlatformConfig {
        owner: owner.to_string(),
        repo: repo.to_string(),
        host: normalize_host(&host),
    })
}

/// Parse a `--repo` override: `OWNER/REPO`, `HOST/OWNER/REPO`, or a URL
pub fn parse_repo_arg(arg: &str) -> Result<PlatformConfig> {
    let arg = arg.trim();
    if arg.contains("://") || arg.starts_with("git@") {
        return parse_repo_info(arg);
    }

    let parts: Vec<&str> = arg.split('/').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(invalid_repo(arg));
    }
    match parts.as_slice() {
        [owner, repo] => Ok(PlatformConfig {
            owner: (*owner).to_string(),
            repo: (*repo).to_string(),
            host: None,
        }),
        [host, owner, repo] => Ok(PlatformConfig {
            owner: (*owner).to_string(),
            repo: (*repo).to_string(),
            host: normalize_host(host),
        }),
        _ => Err(invalid_repo(arg)),
    }
}

/// Pick the repository a pull request is looked up in.
///
/// A URL selector names its own repository; otherwise `repo_arg` (from
/// `--repo`) wins over the base remote. `default_host` only fills in a bare
/// `OWNER/REPO` argument: URLs, including the base remote's, keep the host
/// they name even when it is github.com.
pub fn lookup_repository(
    selector: &PrSelector,
    repo_arg: Option<&str>,
    base_remote: &Remote,
    default_host: &str,
) -> Result<PlatformConfig> {
    if let PrSelector::Url { repo, .. } = selector {
        return Ok(repo.clone());
    }

    let Some(arg) = repo_arg else {
        return base_remote.platform_config().ok_or_else(|| {
            Error::UnrecognizedRemoteUrl(format!(
                "remote '{}' does not point at a GitHub repository; pass --repo",
                base_remote.name
            ))
        });
    };

    let mut config = parse_repo_arg(arg)?;
    let names_host = arg.contains(':') || arg.trim().split('/').count() != 2;
    if !names_host && default_host != DEFAULT_HOST {
        config.host = Some(default_host.to_string());
    }
    Ok(config)
}

/// Interpret the positional checkout argument.
///
/// `42` and `#42` are numbers, `https://<host>/<owner>/<repo>/pull/42`
/// is a URL, anything else is a head branch (`branch` or `owner:branch`).
pub fn parse_pr_selector(arg: &str) -> Result<PrSelector> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(Error::InvalidArgument(
            "expected a pull request number, URL, or branch".to_string(),
        ));
    }

    if let Ok(number) = arg.trim_start_matches('#').parse::<u64>() {
        return Ok(PrSelector::Number(number));
    }

    if arg.starts_with("https://") || arg.starts_with("http://") {
        return parse_pr_url(arg);
    }

    match arg.split_once(':') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Ok(PrSelector::Branch {
            owner: Some(owner.to_string()),
            name: name.to_string(),
        }),
        Some(_) => Err(Error::InvalidArgument(format!(
            "invalid branch selector '{arg}'"
        ))),
        None => Ok(PrSelector::Branch {
            owner: None,
            name: arg.to_string(),
        }),
    }
}

fn parse_pr_url(arg: &str) -> Result<PrSelector> {
    let not_a_pr = || Error::InvalidArgument(format!("'{arg}' is not a pull request URL"));

    let url = Url::parse(arg).map_err(|_| not_a_pr())?;
    let host = url.host_str().ok_or_else(not_a_pr)?;
    let pattern = Regex::new(PR_PATH_PATTERN).map_err(|e| Error::Internal(e.to_string()))?;
    let caps = pattern.captures(url.path()).ok_or_else(not_a_pr)?;
    let number = caps[3].parse::<u64>().map_err(|_| not_a_pr())?;

    Ok(PrSelector::Url {
        repo: PlatformConfig {
            owner: caps[1].to_string(),
            repo: caps[2].to_string(),
            host: normalize_host(host),
        },
        number,
    })
}

fn normalize_host(host: &str) -> Option<String> {
    let host = host.to_ascii_lowercase();
    let host = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("ssh."))
        .unwrap_or(&host);
    (host != DEFAULT_HOST).then(|| host.to_string())
}

fn invalid_repo(arg: &str) -> Error {
    Error::InvalidArgument(format!(
        "expected the \"[HOST/]OWNER/REPO\" format, got \"{arg}\""
    ))
}
