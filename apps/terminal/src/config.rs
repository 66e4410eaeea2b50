//! # Application Configuration
//!
//! Settings for the terminal app, loaded in layers.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Configuration Layers                               │
//! │                                                                         │
//! │  1. Defaults         AppConfig::default()                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  2. Config file      --config <path>, else <config dir>/apotheca.toml  │
//! │         │            (skipped when the file does not exist)            │
//! │         ▼                                                               │
//! │  3. Environment      APOTHECA_DATA_DIR, APOTHECA_BACKUP_INTERVAL, ...  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  4. Flags            --data-dir, --backup-dir, ... (cli.rs)             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  validate()                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example `apotheca.toml`
//! ```toml
//! store_name = "Corner Pharmacy"
//! data_dir = "/srv/pharmacy/data"
//! low_stock_threshold = 5
//!
//! [backup]
//! dir = "/mnt/usb/backups"
//! interval_secs = 600
//! max_backups = 48
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use apotheca_core::{DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_RECEIPT_NAME_WIDTH};
use apotheca_store::StoreConfig;

/// Narrowest receipt name column that still reads.
pub const MIN_RECEIPT_NAME_WIDTH: usize = 4;

const CONFIG_FILE: &str = "apotheca.toml";

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors. All of them stop startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`AppConfig`].
    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of its allowed range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Config Types
// =============================================================================

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Title shown above the menu.
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Directory holding products.json, sales.json and monthly/.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Products with fewer units than this show in Check Stock.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,

    /// Characters of a product name shown on receipts and listings.
    #[serde(default = "default_receipt_name_width")]
    pub receipt_name_width: usize,

    /// Backup scheduler settings.
    #[serde(default)]
    pub backup: BackupSettings,
}

/// Backup scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSettings {
    /// Directory that receives `backup_*` folders.
    #[serde(default = "default_backup_dir")]
    pub dir: PathBuf,

    /// Seconds between automatic backups.
    #[serde(default = "default_backup_interval")]
    pub interval_secs: u64,

    /// Keep only this many backups. Unset keeps all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_backups: Option<usize>,
}

fn default_store_name() -> String {
    "Pharmacy Management System".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_low_stock_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

fn default_receipt_name_width() -> usize {
    DEFAULT_RECEIPT_NAME_WIDTH
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from("./backups")
}

fn default_backup_interval() -> u64 {
    300
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store_name: default_store_name(),
            data_dir: default_data_dir(),
            low_stock_threshold: default_low_stock_threshold(),
            receipt_name_width: default_receipt_name_width(),
            backup: BackupSettings::default(),
        }
    }
}

impl Default for BackupSettings {
    fn default() -> Self {
        BackupSettings {
            dir: default_backup_dir(),
            interval_secs: default_backup_interval(),
            max_backups: None,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

impl AppConfig {
    /// Loads defaults, then the config file, then environment variables.
    ///
    /// Flags are applied afterwards by the caller (see `Cli::apply`), followed
    /// by [`AppConfig::validate`].
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parses one TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(path = %path.display(), "Loading config from file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `APOTHECA_*` overrides read through `var`.
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("APOTHECA_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(dir) = var("APOTHECA_DATA_DIR") {
            debug!(dir = %dir, "Overriding data dir from environment");
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(dir) = var("APOTHECA_BACKUP_DIR") {
            debug!(dir = %dir, "Overriding backup dir from environment");
            self.backup.dir = PathBuf::from(dir);
        }

        if let Some(secs) = var("APOTHECA_BACKUP_INTERVAL") {
            match secs.parse::<u64>() {
                Ok(s) => self.backup.interval_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring APOTHECA_BACKUP_INTERVAL"),
            }
        }

        if let Some(threshold) = var("APOTHECA_LOW_STOCK") {
            match threshold.parse::<u32>() {
                Ok(t) => self.low_stock_threshold = t,
                Err(_) => warn!(value = %threshold, "Ignoring APOTHECA_LOW_STOCK"),
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.backup.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "backup.interval_secs must be greater than 0".into(),
            ));
        }

        if self.receipt_name_width < MIN_RECEIPT_NAME_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "receipt_name_width must be at least {}",
                MIN_RECEIPT_NAME_WIDTH
            )));
        }

        if self.backup.max_backups == Some(0) {
            return Err(ConfigError::Invalid(
                "backup.max_backups must be at least 1 when set".into(),
            ));
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "apotheca", "pos")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Time between automatic backups.
    pub fn backup_interval(&self) -> Duration {
        Duration::from_secs(self.backup.interval_secs)
    }

    /// Store settings derived from this config.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.data_dir)
            .backup_dir(&self.backup.dir)
            .max_backups(self.backup.max_backups)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store_name, "Pharmacy Management System");
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.backup.dir, PathBuf::from("./backups"));
        assert_eq!(config.backup.interval_secs, 300);
        assert_eq!(config.backup.max_backups, None);
        assert_eq!(config.low_stock_threshold, 10);
        assert_eq!(config.receipt_name_width, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apotheca.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/data\"\n\n[backup]\nmax_backups = 3\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(path)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/data"));
        assert_eq!(config.backup.max_backups, Some(3));
        assert_eq!(config.backup.interval_secs, 300);
        assert_eq!(config.store_name, "Pharmacy Management System");
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(config, Err(ConfigError::Read { .. })));

        let loaded = AppConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(loaded.backup.interval_secs, AppConfig::default().backup.interval_secs);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apotheca.toml");
        std::fs::write(&path, "low_stock_threshold = \"many\"").unwrap();

        let err = AppConfig::load(Some(path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("apotheca.toml"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[
            ("APOTHECA_DATA_DIR", "/var/lib/apotheca"),
            ("APOTHECA_BACKUP_INTERVAL", "60"),
            ("APOTHECA_LOW_STOCK", "not-a-number"),
        ]));

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/apotheca"));
        assert_eq!(config.backup.interval_secs, 60);
        assert_eq!(config.low_stock_threshold, 10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.backup.interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.receipt_name_width = 3;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.backup.max_backups = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_store_config() {
        let mut config = AppConfig::default();
        config.backup.max_backups = Some(7);

        let store = config.store_config();
        assert_eq!(store.data_dir, PathBuf::from("./data"));
        assert_eq!(store.backup_dir, PathBuf::from("./backups"));
        assert_eq!(store.max_backups, Some(7));
    }
}
