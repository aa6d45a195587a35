//! Configuration module
//!
//! Settings are read from a TOML file (default
//! `~/.config/depot-sync/config.toml`). Every section and key is optional;
//! missing values fall back to the defaults below.
//!
//! ```toml
//! [api]
//! url = "http://localhost:8080/api/v1/charging/information"
//! timeout_secs = 30
//!
//! [tags]
//! base_path = "[default]ChargePilot"
//! batch_size = 50
//! success_threshold_percent = 80.0
//!
//! [store]
//! backend = "sqlite"
//! database_url = "sqlite://./depot-tags.db?mode=rwc"
//!
//! [poll]
//! interval_secs = 60
//!
//! [logging]
//! level = "info"
//! format = "text"
//!
//! [metrics]
//! enabled = false
//! listen = "0.0.0.0:9108"
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::SyncSettings;
use crate::domain::TagPath;
use crate::infrastructure::DatabaseConfig;
use crate::shared::ConfigError;

/// Default config file location
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("depot-sync")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub tags: TagsConfig,
    pub store: StoreConfig,
    pub poll: PollConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080/api/v1/charging/information".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagsConfig {
    pub base_path: String,
    pub batch_size: usize,
    pub success_threshold_percent: f64,
}

impl Default for TagsConfig {
    fn default() -> Self {
        let defaults = SyncSettings::default();
        Self {
            base_path: defaults.base_path.to_string(),
            batch_size: defaults.batch_size,
            success_threshold_percent: defaults.success_threshold_percent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: String,
    pub auto_migrate: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            backend: StoreBackend::Sqlite,
            database_url: db.url,
            auto_migrate: db.auto_migrate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub listen: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            listen: "0.0.0.0:9108".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.url must not be empty".into()));
        }
        if self.tags.batch_size == 0 {
            return Err(ConfigError::Invalid("tags.batch_size must be at least 1".into()));
        }
        if !(0.0..=100.0).contains(&self.tags.success_threshold_percent) {
            return Err(ConfigError::Invalid(
                "tags.success_threshold_percent must be between 0 and 100".into(),
            ));
        }
        if self.poll.interval_secs == 0 {
            return Err(ConfigError::Invalid("poll.interval_secs must be at least 1".into()));
        }
        if self.metrics.enabled {
            self.metrics_addr()?;
        }
        Ok(())
    }

    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings {
            base_path: TagPath::new(self.tags.base_path.clone()),
            batch_size: self.tags.batch_size,
            success_threshold_percent: self.tags.success_threshold_percent,
        }
    }

    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.store.database_url.clone(),
            auto_migrate: self.store.auto_migrate,
        }
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll.interval_secs)
    }

    pub fn metrics_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.metrics
            .listen
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("metrics.listen '{}': {}", self.metrics.listen, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.tags.batch_size, 50);
        assert_eq!(config.tags.success_threshold_percent, 80.0);
        assert_eq!(config.tags.base_path, "[default]ChargePilot");
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_partial_sections_merge_with_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            url = "http://depot-api:9000/info"

            [tags]
            batch_size = 25

            [store]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.url, "http://depot-api:9000/info");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.tags.batch_size, 25);
        assert_eq!(config.store.backend, StoreBackend::Memory);

        let settings = config.sync_settings();
        assert_eq!(settings.batch_size, 25);
        assert_eq!(settings.base_path.as_str(), "[default]ChargePilot");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(matches!(
            AppConfig::from_toml("[tags]\nbatch_size = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_toml("[tags]\nsuccess_threshold_percent = 120.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_toml("[poll]\ninterval_secs = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_toml("[metrics]\nenabled = true\nlisten = \"nope\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_toml("[api]\nurl = 5"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load(Path::new("/nonexistent/depot-sync.toml")).unwrap();
        assert_eq!(config.api.timeout_secs, 30);
    }
}
