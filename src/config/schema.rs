//! Configuration schema
//!
//! Defines the structure of the configuration file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub paths: PathsConfig,
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Send usage events (opt-in)
    #[serde(default)]
    pub tracking: bool,
}

/// Analytics endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Property id events are reported under (empty = log only)
    #[serde(default)]
    pub tracking_id: String,

    /// Anonymous client identifier
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Collection endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            tracking_id: String::new(),
            client_id: default_client_id(),
            endpoint: default_endpoint(),
        }
    }
}

/// Network settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Minimum interval between progress reports
    #[serde(default = "default_progress_throttle")]
    pub progress_throttle_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            progress_throttle_ms: default_progress_throttle(),
            user_agent: default_user_agent(),
        }
    }
}

/// Path overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Application data root (default: ~/Kitematic)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

// Default value functions for serde
fn default_client_id() -> String {
    "anonymous".to_string()
}
fn default_endpoint() -> String {
    "https://www.google-analytics.com/collect".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_progress_throttle() -> u64 {
    250
}
fn default_user_agent() -> String {
    format!("kiteutil/{}", env!("CARGO_PKG_VERSION"))
}
