//! XDG-style path utilities for configuration and cache directories.
//!
//! Paths prefer the XDG Base Directory conventions over OS-specific
//! locations, so the bot keeps its files in the same place on every host.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "vocab-bot";

/// Returns the configuration directory for the bot.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/vocab-bot` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/vocab-bot` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(".config").join(APP_DIR)),
    }
}

/// Returns the cache directory for the bot (downloaded fonts live here).
///
/// Resolution order:
/// 1. `$XDG_CACHE_HOME/vocab-bot` if `XDG_CACHE_HOME` is set
/// 2. `~/.cache/vocab-bot` otherwise
pub fn cache_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CACHE_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(".cache").join(APP_DIR)),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}
