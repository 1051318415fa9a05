//! Application configuration
//!
//! Settings are loaded from an optional YAML file; every field has a
//! default so an empty file (or no file at all) yields a working setup.
//! Command-line flags are applied on top by the CLI runner.

use crate::engine::FetchConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Production Evotor cloud API
pub const DEFAULT_BASE_URL: &str = "https://api.evotor.ru/";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote API settings
    pub api: ApiConfig,

    /// Log sinks
    pub logging: LoggingConfig,

    /// Interactive session behavior
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml(&text)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "api.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.api.max_pages == 0 {
            return Err(Error::invalid_value("api.max_pages", "must be at least 1"));
        }
        if self.session.max_attempts == 0 {
            return Err(Error::invalid_value(
                "session.max_attempts",
                "must be at least 1",
            ));
        }
        if self.logging.file_name.is_empty() {
            return Err(Error::invalid_value("logging.file_name", "must not be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// API
// ============================================================================

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL for all requests
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Upper bound on pages followed for one collection
    pub max_pages: usize,

    /// User agent override
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_pages: FetchConfig::default().max_pages,
            user_agent: None,
        }
    }
}

impl ApiConfig {
    /// HTTP client settings derived from this config
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }

    /// Fetch engine settings derived from this config
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::default().with_max_pages(self.max_pages)
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Log sink settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for log files, created if absent
    pub dir: PathBuf,

    /// Name of the active log file
    pub file_name: String,

    /// Default filter when `RUST_LOG` is unset
    pub level: String,

    /// Size at which the active file is rotated
    pub max_file_bytes: u64,

    /// Rotated files kept next to the active one
    pub max_backups: usize,

    /// Also log to the console
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            file_name: "evotor-export.log".to_string(),
            level: "info".to_string(),
            max_file_bytes: 3 * 1024 * 1024,
            max_backups: 3,
            console: true,
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Interactive session behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Attempts (first run plus retries) before giving up
    pub max_attempts: u32,

    /// Destination of the goods export
    pub goods_output: PathBuf,

    /// Wait for Enter before exiting
    pub wait_on_exit: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            goods_output: PathBuf::from("goods.json"),
            wait_on_exit: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "https://api.evotor.ru/");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.logging.dir, PathBuf::from("logs"));
        assert_eq!(config.logging.max_file_bytes, 3 * 1024 * 1024);
        assert_eq!(config.logging.max_backups, 3);
        assert_eq!(config.session.goods_output, PathBuf::from("goods.json"));
        assert!(config.session.wait_on_exit);
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
        assert_eq!(AppConfig::from_yaml("  \n").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r"
api:
  base_url: http://localhost:8080/
session:
  max_attempts: 2
logging:
  dir: /var/log/evotor
";
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.session.max_attempts, 2);
        assert_eq!(config.session.goods_output, PathBuf::from("goods.json"));
        assert_eq!(config.logging.dir, PathBuf::from("/var/log/evotor"));
        assert_eq!(config.logging.file_name, "evotor-export.log");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = AppConfig::from_yaml("api: 42").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".into();
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        let mut config = AppConfig::default();
        config.api.base_url = "ftp://api.evotor.ru/".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.session.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.api.max_pages = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "session:\n  wait_on_exit: false\n").unwrap();

        let config = AppConfig::load(Some(path.as_path())).unwrap();
        assert!(!config.session.wait_on_exit);

        let missing = dir.path().join("missing.yaml");
        let err = AppConfig::load(Some(missing.as_path())).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn test_http_client_config_from_api() {
        let api = ApiConfig {
            user_agent: Some("agent/1".into()),
            timeout_secs: 5,
            ..ApiConfig::default()
        };
        let http = api.http_client_config();
        assert_eq!(http.base_url.as_deref(), Some("https://api.evotor.ru/"));
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert_eq!(http.user_agent, "agent/1");
        assert_eq!(api.fetch_config().max_pages, 10_000);
    }
}
