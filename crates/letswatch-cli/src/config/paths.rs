//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Application directory name under the config base.
const APP_DIR: &str = "letswatch";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// Lookup order: `{dir}/config.toml` when `--dir` is given, then
/// `$XDG_CONFIG_HOME/letswatch/config.toml`, then
/// `~/.config/letswatch/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    config_path_from(
        dir.map(PathBuf::as_path),
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from).as_deref(),
        std::env::var_os("HOME").map(PathBuf::from).as_deref(),
    )
}

/// Pure form of [`resolve_config_path`]; empty variables count as unset.
fn config_path_from(dir: Option<&Path>, xdg: Option<&Path>, home: Option<&Path>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    if let Some(base) = xdg.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(base.join(APP_DIR).join(CONFIG_FILE));
    }
    match home.filter(|p| !p.as_os_str().is_empty()) {
        Some(home) => Ok(home.join(".config").join(APP_DIR).join(CONFIG_FILE)),
        None => bail!("neither XDG_CONFIG_HOME nor HOME is set; pass --dir"),
    }
}
