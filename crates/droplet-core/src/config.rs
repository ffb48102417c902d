//! TOML-based application configuration.
//!
//! Host-level settings only (the per-user settings live in profiles):
//! tick interval, default timezone for unresolvable identifiers, and an
//! optional database path override.
//!
//! Configuration is stored at `~/.config/droplet/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::clock::ZoneResolver;
use crate::error::ConfigError;
use crate::store::data_dir;

const CONFIG_FILE: &str = "config.toml";

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/droplet/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Seconds between tick passes.
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,
    /// Zone used when a profile's timezone identifier does not resolve.
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
    /// Database file override; defaults to `<data_dir>/droplet.db`.
    #[serde(default)]
    pub database_file: Option<PathBuf>,
}

fn default_tick_interval_secs() -> u64 {
    60
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval_secs(),
            default_timezone: default_timezone(),
            database_file: None,
        }
    }
}

impl AppConfig {
    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::load_from(&Self::path()?))
    }

    /// Load from an explicit path; a missing or unreadable file yields
    /// defaults, a present-but-invalid file keeps its parse error only in
    /// the log so a typo cannot take the daemon down.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::WriteFailed {
            path: PathBuf::from(path),
            source,
        })
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join(CONFIG_FILE))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    /// The configured default zone, itself falling back to UTC.
    pub fn default_zone(&self) -> FixedOffset {
        ZoneResolver::validate(&self.default_timezone)
            .unwrap_or(FixedOffset::east_opt(0).unwrap())
    }

    pub fn zone_resolver(&self) -> ZoneResolver {
        ZoneResolver::new(self.default_zone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config = AppConfig::default();
        assert_eq!(config.tick_interval_secs, 60);
        assert_eq!(config.default_timezone, "UTC");
        assert!(config.database_file.is_none());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AppConfig = toml::from_str("tick_interval_secs = 30").unwrap();
        assert_eq!(config.tick_interval_secs, 30);
        assert_eq!(config.default_timezone, "UTC");
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = AppConfig {
            tick_interval_secs: 15,
            default_timezone: "UTC+2".to_string(),
            database_file: Some(PathBuf::from("/tmp/test.db")),
        };

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path), config);
    }

    #[test]
    fn missing_or_invalid_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load_from(&dir.path().join("nope.toml")), AppConfig::default());

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "tick_interval_secs = \"soon\"").unwrap();
        assert_eq!(AppConfig::load_from(&bad), AppConfig::default());
    }

    #[test]
    fn bad_default_timezone_degrades_to_utc() {
        let config = AppConfig {
            default_timezone: "Narnia/Lamppost".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.default_zone(), FixedOffset::east_opt(0).unwrap());
    }
}
