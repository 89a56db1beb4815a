//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path and logging options with documented defaults.
//! - Reject malformed values before any connection or logger is opened.
//!
//! Variables:
//! - `NEWSPORTAL_DB_PATH`: database file; defaults to
//!   `<temp dir>/newsportal.sqlite3`.
//! - `NEWSPORTAL_LOG_LEVEL`: `trace|debug|info|warn|error`; defaults to the
//!   build-mode level.
//! - `NEWSPORTAL_LOG_DIR`: absolute directory for rolling logs; logging stays
//!   off when unset.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "NEWSPORTAL_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "NEWSPORTAL_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "NEWSPORTAL_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "newsportal.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::RelativeLogDir(path) => {
                write!(f, "log directory must be absolute, got `{}`", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

/// Effective settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl PortalConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config = config.with_log_level(&level)?;
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            config = config.with_log_dir(dir)?;
        }
        Ok(config)
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Result<Self, ConfigError> {
        self.log_level = normalize_level(level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(self)
    }

    pub fn with_log_dir(mut self, dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        if !dir.is_absolute() {
            return Err(ConfigError::RelativeLogDir(dir.to_path_buf()));
        }
        self.log_dir = Some(dir.to_path_buf());
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PortalConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = PortalConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.db_path.ends_with("newsportal.sqlite3"));
        assert_eq!(config.log_level, default_log_level());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn environment_values_override_defaults() {
        let log_dir = std::env::temp_dir().join("newsportal-config-test");
        let config = PortalConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, " /var/lib/portal.db "),
            (LOG_LEVEL_ENV, "WARNING"),
            (LOG_DIR_ENV, log_dir.to_str().unwrap()),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/portal.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(log_dir));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = PortalConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "   ")])).unwrap();
        assert_eq!(config.db_path, PortalConfig::default().db_path);
    }

    #[test]
    fn bad_level_and_relative_dir_are_rejected() {
        let err = PortalConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));

        let err = PortalConfig::from_lookup(lookup_from(&[(LOG_DIR_ENV, "logs")])).unwrap_err();
        assert_eq!(err, ConfigError::RelativeLogDir(PathBuf::from("logs")));
    }
}
