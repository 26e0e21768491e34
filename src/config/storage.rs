//! Loading the user config file.

use super::UserConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name for pr-checkout within the platform config dir.
const APP_DIR: &str = "pr-checkout";

/// Filename for user configuration.
const CONFIG_FILE: &str = "config.toml";

/// Get path to the config file under `config_root`.
pub fn config_path(config_root: &Path) -> PathBuf {
    config_root.join(APP_DIR).join(CONFIG_FILE)
}

/// Load configuration from `path`.
///
/// Returns defaults if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Load configuration from the platform config directory.
///
/// Returns defaults when the platform has no config directory.
pub fn load_user_config() -> Result<UserConfig> {
    dirs::config_dir().map_or_else(
        || Ok(UserConfig::default()),
        |root| load_config(&config_path(&root)),
    )
}
