//! Layered configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use reqwest::Url;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `api.base_url` is not an http(s) URL.
    #[error("Invalid api.base_url: {0:?}. Must be an http(s) URL")]
    InvalidBaseUrl(String),

    /// `api.timeout_secs` is zero.
    #[error("Invalid api.timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    /// `deep_link.host` is empty.
    #[error("deep_link.host cannot be empty")]
    EmptyDeepLinkHost,

    /// `storage.path` is empty.
    #[error("storage.path cannot be empty")]
    EmptyStoragePath,

    /// `logging.level` is not a known level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .inspect/config.yaml
    /// 3. .inspect/local.yaml (optional developer overrides)
    /// 4. Environment variables (INSPECT_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment(Yaml::file(".inspect/config.yaml"))
            .merge(Yaml::file(".inspect/local.yaml"))
            .merge(Env::prefixed("INSPECT_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file; environment variables still
    /// take precedence.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let path = path.as_ref();
        let config: Config = Self::figment(Yaml::file(path))
            .merge(Env::prefixed("INSPECT_").split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment(file: figment::providers::Data<Yaml>) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(file)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let base_url = &config.api.base_url;
        let valid_url = Url::parse(base_url)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .unwrap_or(false);
        if !valid_url {
            return Err(ConfigError::InvalidBaseUrl(base_url.clone()));
        }

        if config.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.api.timeout_secs));
        }

        if config.deep_link.host.trim().is_empty() {
            return Err(ConfigError::EmptyDeepLinkHost);
        }

        if config.storage.path.trim().is_empty() {
            return Err(ConfigError::EmptyStoragePath);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::logging::LogFormat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://inspect.datagotchi.net");
        assert_eq!(config.deep_link.host, "inspect.datagotchi.net");
        assert_eq!(config.storage.path, ".inspect/session.json");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
api:
  base_url: http://localhost:5000
  timeout_secs: 5
deep_link:
  host: inspect.example
logging:
  level: debug
  format: json
";
        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.deep_link.host, "inspect.example");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.share.app_group, "net.datagotchi.inspect");
        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.api.base_url = "ftp://inspect.example".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBaseUrl(_))
        ));

        config.api.base_url = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn test_validate_empty_host_and_path() {
        let mut config = Config::default();
        config.deep_link.host = " ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyDeepLinkHost)
        ));

        let mut config = Config::default();
        config.storage.path = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyStoragePath)
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "loud"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_override_beats_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api:\n  base_url: http://file.example\n  timeout_secs: 7\ndeep_link:\n  host: file.example"
        )
        .unwrap();
        file.flush().unwrap();

        temp_env::with_vars(
            [
                ("INSPECT_API__BASE_URL", Some("http://env.example")),
                ("INSPECT_LOGGING__LEVEL", Some("debug")),
            ],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.api.base_url, "http://env.example");
                assert_eq!(config.api.timeout_secs, 7, "file value should persist");
                assert_eq!(config.deep_link.host, "file.example");
                assert_eq!(config.logging.level, "debug");
            },
        );
    }

    #[test]
    fn test_invalid_file_value_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api:\n  timeout_secs: 0").unwrap();
        file.flush().unwrap();

        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }
}
