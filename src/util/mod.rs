//! Utility module
//!
//! Common utilities used across the application.

pub mod download;
pub mod fs;
pub mod hash;

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable holding the application install directory
pub const INSTALL_DIR_ENV: &str = "DIR";

/// Get the user's home directory
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Get the directory holding bundled helper binaries
pub fn bin_dir() -> Result<PathBuf> {
    bin_dir_from(std::env::var_os(INSTALL_DIR_ENV))
}

fn bin_dir_from(install_dir: Option<OsString>) -> Result<PathBuf> {
    let dir = install_dir
        .filter(|d| !d.is_empty())
        .context(format!("{} is not set", INSTALL_DIR_ENV))?;
    Ok(PathBuf::from(dir).join("resources"))
}

/// Get the per-user resource directory
pub fn resource_dir() -> PathBuf {
    if cfg!(target_os = "macos") {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join("Kitematic")
            .join("Resources")
    } else {
        dirs::data_dir()
            .unwrap_or_else(home_dir)
            .join("Kitematic")
            .join("Resources")
    }
}
