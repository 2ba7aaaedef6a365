//! Configuration management.

use gomarketplace_core::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_config_path, default_data_dir, load_json, save_json};

// ============================================================================
// Options
// ============================================================================

/// Which cart value a mutation writes to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PersistMode {
    /// Write the cart produced by the mutation.
    #[default]
    Immediate,
    /// Write the cart as it was before the mutation, so storage trails
    /// memory by one change. Matches carts saved by older app builds.
    Lagged,
}

impl std::fmt::Display for PersistMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistMode::Immediate => write!(f, "immediate"),
            PersistMode::Lagged => write!(f, "lagged"),
        }
    }
}

impl std::str::FromStr for PersistMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "immediate" => Ok(PersistMode::Immediate),
            "lagged" | "legacy" => Ok(PersistMode::Lagged),
            other => Err(StoreError::Config(format!(
                "unknown persist mode: {other} (expected immediate or lagged)"
            ))),
        }
    }
}

/// What to do when the stored cart cannot be decoded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorruptDataPolicy {
    /// Log a warning and start with an empty cart.
    #[default]
    Recover,
    /// Refuse to open the store.
    Fail,
}

impl std::fmt::Display for CorruptDataPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorruptDataPolicy::Recover => write!(f, "recover"),
            CorruptDataPolicy::Fail => write!(f, "fail"),
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Settings a [`CartStore`](crate::CartStore) is opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartStoreOptions {
    /// Key the cart blob is stored under.
    pub storage_key: String,
    /// Which value mutations persist.
    pub persist_mode: PersistMode,
    /// Handling of an undecodable stored cart.
    pub corrupt_data: CorruptDataPolicy,
}

impl Default for CartStoreOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            persist_mode: PersistMode::default(),
            corrupt_data: CorruptDataPolicy::default(),
        }
    }
}

// ============================================================================
// Store Config
// ============================================================================

/// Application configuration, stored as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key the cart blob is stored under.
    pub storage_key: String,
    /// Which value mutations persist.
    pub persist_mode: PersistMode,
    /// Handling of an undecodable stored cart.
    pub corrupt_data: CorruptDataPolicy,
    /// Directory for file-backed storage. `None` uses the platform default.
    pub data_dir: Option<PathBuf>,
    /// Log level used when no verbosity flag is given.
    pub log_level: LogLevel,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            persist_mode: PersistMode::default(),
            corrupt_data: CorruptDataPolicy::default(),
            data_dir: None,
            log_level: LogLevel::default(),
        }
    }
}

impl StoreConfig {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from the default path.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::default_path()).await
    }

    /// Loads configuration from a specific path, using defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed, or
    /// holds an empty storage key.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !tokio::fs::try_exists(path).await? {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let config: StoreConfig = load_json(path).await?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        self.validate()?;
        save_json(path, self).await?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Checks the configuration for values the store cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` for an empty storage key.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.storage_key.trim().is_empty() {
            return Err(StoreError::Config("storage_key must not be empty".to_string()));
        }
        Ok(())
    }

    /// Directory for file-backed storage.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    /// Store options derived from this configuration.
    pub fn cart_options(&self) -> CartStoreOptions {
        CartStoreOptions {
            storage_key: self.storage_key.clone(),
            persist_mode: self.persist_mode,
            corrupt_data: self.corrupt_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "@gomarketplace:products");
        assert_eq!(config.persist_mode, PersistMode::Immediate);
        assert_eq!(config.corrupt_data, CorruptDataPolicy::Recover);
        assert_eq!(config.cart_options(), CartStoreOptions::default());
    }

    #[test]
    fn test_persist_mode_parse() {
        assert_eq!("immediate".parse::<PersistMode>().unwrap(), PersistMode::Immediate);
        assert_eq!("LAGGED".parse::<PersistMode>().unwrap(), PersistMode::Lagged);
        assert_eq!("legacy".parse::<PersistMode>().unwrap(), PersistMode::Lagged);
        assert!("sometimes".parse::<PersistMode>().is_err());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = StoreConfig {
            data_dir: Some(PathBuf::from("/tmp/cart")),
            ..StoreConfig::default()
        };
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/cart"));
    }

    #[test]
    fn test_empty_key_invalid() {
        let config = StoreConfig {
            storage_key: "  ".to_string(),
            ..StoreConfig::default()
        };
        assert!(matches!(config.validate(), Err(StoreError::Config(_))));
    }

    #[tokio::test]
    async fn test_load_missing_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::load_from(&temp_dir.path().join("config.json"))
            .await
            .unwrap();
        assert_eq!(config, StoreConfig::default());
    }
}
