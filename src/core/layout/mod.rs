//! Application data layout
//!
//! Locations under the per-user application directory.

use crate::config::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Per-user application directory tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KiteLayout {
    root: PathBuf,
}

impl Default for KiteLayout {
    fn default() -> Self {
        Self::new(crate::util::home_dir().join("Kitematic"))
    }
}

impl KiteLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Layout for the configured root, or the default one
    pub fn from_config(config: &Config) -> Self {
        match &config.paths.root {
            Some(root) => Self::new(root),
            None => Self::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the image tarball cache directory
    pub fn tar_dir(&self) -> PathBuf {
        self.root.join(".tar")
    }

    /// Get the image metadata directory
    pub fn images_dir(&self) -> PathBuf {
        self.root.join(".images")
    }

    /// Get the data directory of an app
    pub fn app_dir(&self, app_name: &str) -> PathBuf {
        self.root.join(app_name)
    }

    /// Create the root and its hidden cache directories
    pub fn ensure(&self) -> Result<()> {
        for dir in [self.root.clone(), self.tar_dir(), self.images_dir()] {
            std::fs::create_dir_all(&dir).context(format!("Failed to create {:?}", dir))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = KiteLayout::new("/home/me/Kitematic");
        assert_eq!(layout.tar_dir(), PathBuf::from("/home/me/Kitematic/.tar"));
        assert_eq!(layout.images_dir(), PathBuf::from("/home/me/Kitematic/.images"));
        assert_eq!(layout.app_dir("redis"), PathBuf::from("/home/me/Kitematic/redis"));
    }

    #[test]
    fn test_default_root_is_under_home() {
        let layout = KiteLayout::default();
        assert!(layout.root().ends_with("Kitematic"));
    }

    #[test]
    fn test_config_override() {
        let mut config = Config::default();
        assert_eq!(KiteLayout::from_config(&config), KiteLayout::default());

        config.paths.root = Some(PathBuf::from("/data/kite"));
        assert_eq!(KiteLayout::from_config(&config).root(), Path::new("/data/kite"));
    }

    #[test]
    fn test_ensure_creates_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = KiteLayout::new(tmp.path().join("Kitematic"));

        layout.ensure().unwrap();
        layout.ensure().unwrap();

        assert!(layout.tar_dir().is_dir());
        assert!(layout.images_dir().is_dir());
    }
}
