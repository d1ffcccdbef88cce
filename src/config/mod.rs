//! Configuration module
//!
//! Handles loading and saving configuration.

mod schema;

pub use schema::{AnalyticsConfig, Config, GeneralConfig, NetworkConfig, PathsConfig};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the configuration directory path
pub fn config_dir() -> PathBuf {
    crate::util::home_dir().join(".kiteutil")
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load configuration from disk
pub fn load() -> Result<Config> {
    load_from(&config_path())
}

/// Save configuration to disk
pub fn save(config: &Config) -> Result<()> {
    save_to(config, &config_path())
}

/// Load configuration from `path`, writing defaults if it does not exist
pub fn load_from(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config {:?}", path))?;
        let config: Config =
            toml::from_str(&content).context(format!("Invalid config {:?}", path))?;
        Ok(config)
    } else {
        let config = Config::default();
        save_to(&config, path)?;
        Ok(config)
    }
}

/// Save configuration to `path`
pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;

    tracing::info!("Configuration saved to {:?}", path);
    Ok(())
}
