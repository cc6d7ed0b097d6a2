//! Configuration management for SiteProbe.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/siteprobe/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Outbound HTTP settings
    pub fetch: FetchConfig,
    /// Batch size and parallelism
    pub batch: BatchConfig,
    /// Per-requester throttle
    pub throttle: ThrottleConfig,
    /// Card synthesizer limits
    pub cards: CardConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if not found.
    pub fn load_from(config_path: &Path) -> ConfigResult<Self> {
        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SITEPROBE_TIMEOUT_SECS`: Override the per-fetch timeout
    /// - `SITEPROBE_CONCURRENCY`: Override batch parallelism
    /// - `SITEPROBE_THROTTLE_SECS`: Override the per-requester interval
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("SITEPROBE_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.fetch.timeout_secs = secs;
                tracing::debug!("Override fetch.timeout_secs from env: {}", secs);
            }
        }

        if let Ok(val) = std::env::var("SITEPROBE_CONCURRENCY") {
            if let Ok(concurrency) = val.parse() {
                self.batch.concurrency = concurrency;
                tracing::debug!("Override batch.concurrency from env: {}", concurrency);
            }
        }

        if let Ok(val) = std::env::var("SITEPROBE_THROTTLE_SECS") {
            if let Ok(secs) = val.parse() {
                self.throttle.interval_secs = secs;
                tracing::debug!("Override throttle.interval_secs from env: {}", secs);
            }
        }

        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.fetch.timeout_secs == 0 {
            return Err(invalid("fetch.timeout_secs", "must be greater than zero"));
        }
        if self.batch.concurrency == 0 {
            return Err(invalid("batch.concurrency", "must be greater than zero"));
        }
        if self.batch.min_addresses > self.batch.max_addresses {
            return Err(invalid(
                "batch.min_addresses",
                &format!(
                    "{} exceeds batch.max_addresses ({})",
                    self.batch.min_addresses, self.batch.max_addresses
                ),
            ));
        }
        if self.throttle.max_tracked_requesters == 0 {
            return Err(invalid(
                "throttle.max_tracked_requesters",
                "must be greater than zero",
            ));
        }
        if self.cards.max_count == 0 {
            return Err(invalid("cards.max_count", "must be greater than zero"));
        }
        if !(0..=MAX_YEAR_SPAN).contains(&self.cards.year_span) {
            return Err(invalid(
                "cards.year_span",
                &format!("must be between 0 and {MAX_YEAR_SPAN}"),
            ));
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/siteprobe/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "siteprobe", "siteprobe").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl FetchConfig {
    /// Timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!("siteprobe/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Batch size and parallelism.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Smallest accepted batch (inclusive)
    pub min_addresses: usize,
    /// Largest accepted batch (inclusive)
    pub max_addresses: usize,
    /// Addresses probed at the same time
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            min_addresses: 50,
            max_addresses: 100,
            concurrency: 8,
        }
    }
}

/// Per-requester throttle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Minimum seconds between two allowed requests from one requester
    pub interval_secs: u64,
    /// Requesters remembered before the oldest is evicted
    pub max_tracked_requesters: usize,
}

impl ThrottleConfig {
    /// Interval as a [`Duration`].
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            max_tracked_requesters: 10_000,
        }
    }
}

/// Largest accepted `cards.year_span`.
pub const MAX_YEAR_SPAN: i32 = 50;

/// Card synthesizer limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Most records a single request may ask for
    pub max_count: usize,
    /// Expiry years span `current..=current + year_span`
    pub year_span: i32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            max_count: 10,
            year_span: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.batch.min_addresses, 50);
        assert_eq!(config.batch.max_addresses, 100);
        assert_eq!(config.throttle.interval(), Duration::from_secs(5));
        assert_eq!(config.cards.max_count, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[fetch]"));
        assert!(toml_str.contains("[batch]"));
        assert!(toml_str.contains("[throttle]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.batch.concurrency, config.batch.concurrency);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.batch.concurrency = 16;
        config.fetch.user_agent = "probe-test".to_string();

        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(loaded.batch.concurrency, 16);
        assert_eq!(loaded.fetch.user_agent, "probe-test");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().expect("create temp dir");
        let loaded = AppConfig::load_from(&tmp.path().join("absent.toml")).expect("load");
        assert_eq!(loaded.batch.max_addresses, 100);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r"
[batch]
concurrency = 2

[throttle]
interval_secs = 30
";

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.batch.concurrency, 2);
        assert_eq!(config.throttle.interval_secs, 30);
        // These should be defaults
        assert_eq!(config.batch.min_addresses, 50);
        assert_eq!(config.fetch.timeout_secs, 10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.fetch.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "fetch.timeout_secs"
        ));

        let mut config = AppConfig::default();
        config.batch.min_addresses = 200;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.batch.concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.cards.year_span = i32::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "cards.year_span"
        ));

        config.cards.year_span = -1;
        assert!(config.validate().is_err());

        config.cards.year_span = MAX_YEAR_SPAN;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        // The only test that touches SITEPROBE_* variables.
        std::env::set_var("SITEPROBE_TIMEOUT_SECS", "3");
        std::env::set_var("SITEPROBE_CONCURRENCY", "2");
        std::env::set_var("SITEPROBE_THROTTLE_SECS", "30");
        let config = AppConfig::default().with_env_overrides();
        assert_eq!(config.fetch.timeout_secs, 3);
        assert_eq!(config.batch.concurrency, 2);
        assert_eq!(config.throttle.interval_secs, 30);

        std::env::set_var("SITEPROBE_TIMEOUT_SECS", "soon");
        std::env::set_var("SITEPROBE_CONCURRENCY", "-4");
        std::env::set_var("SITEPROBE_THROTTLE_SECS", "");
        let config = AppConfig::default().with_env_overrides();
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.batch.concurrency, 8);
        assert_eq!(config.throttle.interval_secs, 5);

        std::env::remove_var("SITEPROBE_TIMEOUT_SECS");
        std::env::remove_var("SITEPROBE_CONCURRENCY");
        std::env::remove_var("SITEPROBE_THROTTLE_SECS");
        let config = AppConfig::default().with_env_overrides();
        assert_eq!(config.fetch.timeout_secs, 10);
    }
}
