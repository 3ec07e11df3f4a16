//! Files audience-sync keeps on disk
//!
//! Everything lives in one directory (~/.config/audience-sync/):
//!
//! - `mailchimp.json`: list id, API key and optional `page_size`,
//!   `poll_interval_secs` and `debug` settings.
//! - desired-state files for `audience-sync sync`: the people who should be
//!   subscribed and the segments they belong to. A bare file name that does
//!   not exist in the working directory is looked up here.
//!
//! Call [`init`] at startup so the directory exists before anything is read.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Name of the config directory under the platform config root
pub const APP_DIR: &str = "audience-sync";

/// Mailchimp credentials and settings
pub const MAILCHIMP_FILE: &str = "mailchimp.json";

/// Create ~/.config/audience-sync/ if missing and return it
pub fn init() -> Result<PathBuf> {
    let dir = config_dir().context("Could not determine config directory")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    Ok(dir)
}

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR))
}

/// Path of a file inside the config directory
pub fn config_path(filename: &str) -> Option<PathBuf> {
    config_dir().map(|p| p.join(filename))
}

pub fn config_exists(filename: &str) -> bool {
    config_path(filename).is_some_and(|p| p.exists())
}

/// Load a JSON file from the config directory
pub fn load_json<T: DeserializeOwned>(filename: &str) -> Result<T> {
    let path = config_path(filename).context("Could not determine config directory")?;
    load_json_file(&path)
}

pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Locate a desired-state file
///
/// Paths that exist are used as given. A bare file name falls back to the
/// config directory; anything else is returned unchanged so the read error
/// names what the user typed.
pub fn resolve_state_file(path: &Path) -> PathBuf {
    resolve_state_file_in(path, config_dir().as_deref())
}

fn resolve_state_file_in(path: &Path, dir: Option<&Path>) -> PathBuf {
    if path.exists() || path.components().count() != 1 {
        return path.to_path_buf();
    }
    match dir.map(|d| d.join(path)) {
        Some(candidate) if candidate.exists() => candidate,
        _ => path.to_path_buf(),
    }
}

/// Load a desired-state file, see [`resolve_state_file`]
pub fn load_state_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    load_json_file(&resolve_state_file(path))
}
