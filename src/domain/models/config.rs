//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::infrastructure::logging::LogConfig;

/// Main configuration structure for the Inspect client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Deep link recognition
    #[serde(default)]
    pub deep_link: DeepLinkConfig,

    /// Persisted session storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Share-intent configuration
    #[serde(default)]
    pub share: ShareConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LogConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ApiConfig {
    /// Base URL every API path is resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://inspect.datagotchi.net".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Deep link recognition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DeepLinkConfig {
    /// Host whose `/facts/{id}` links open a summary
    #[serde(default = "default_deep_link_host")]
    pub host: String,
}

fn default_deep_link_host() -> String {
    "inspect.datagotchi.net".to_string()
}

impl Default for DeepLinkConfig {
    fn default() -> Self {
        Self {
            host: default_deep_link_host(),
        }
    }
}

/// Persisted session storage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageConfig {
    /// JSON file holding the key/value session store
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    ".inspect/session.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Share-intent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ShareConfig {
    /// App group the OS share extension delivers into
    #[serde(default = "default_app_group")]
    pub app_group: String,
}

fn default_app_group() -> String {
    "net.datagotchi.inspect".to_string()
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            app_group: default_app_group(),
        }
    }
}
