//! # Store Configuration
//!
//! Where the snapshot lives and how the store treats its directory.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     WASHER_SNAPSHOT_PATH=/srv/washer/company.json                      │
//! │     WASHER_CREATE_DIRS=false                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/company/store.toml (Linux)                               │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     <platform data dir>/washer_company.json, create_dirs = true        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # store.toml
//! snapshot_path = "/srv/washer/company.json"
//! create_dirs = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// File name of the snapshot inside the data directory.
pub const SNAPSHOT_FILE_NAME: &str = "washer_company.json";

/// File name of the optional config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "store.toml";

const ENV_SNAPSHOT_PATH: &str = "WASHER_SNAPSHOT_PATH";
const ENV_CREATE_DIRS: &str = "WASHER_CREATE_DIRS";

/// Snapshot store configuration.
///
/// ## Example
/// ```rust
/// use washer_store::StoreConfig;
///
/// let config = StoreConfig::new("./data/company.json").create_dirs(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Snapshot file location.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Create missing parent directories on persist.
    /// Default: true
    #[serde(default = "default_true")]
    pub create_dirs: bool,
}

fn default_snapshot_path() -> PathBuf {
    directories::ProjectDirs::from("com", "washer", "company")
        .map(|dirs| dirs.data_dir().join(SNAPSHOT_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(SNAPSHOT_FILE_NAME))
}

fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            snapshot_path: default_snapshot_path(),
            create_dirs: default_true(),
        }
    }
}

impl StoreConfig {
    /// Creates a configuration for an explicit snapshot path.
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            snapshot_path: snapshot_path.into(),
            create_dirs: default_true(),
        }
    }

    /// Sets whether missing parent directories are created on persist.
    pub fn create_dirs(mut self, create: bool) -> Self {
        self.create_dirs = create;
        self
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (store.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                config = Self::read_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.snapshot_path.as_os_str().is_empty() {
            return Err(StoreError::InvalidConfig(
                "snapshot_path must not be empty".into(),
            ));
        }

        if self.snapshot_path.file_name().is_none() {
            return Err(StoreError::InvalidConfig(format!(
                "snapshot_path must name a file, got: {}",
                self.snapshot_path.display()
            )));
        }

        Ok(())
    }

    fn read_file(path: &Path) -> StoreResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StoreError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var(ENV_SNAPSHOT_PATH) {
            debug!(path = %path, "Overriding snapshot path from environment");
            self.snapshot_path = PathBuf::from(path);
        }

        if let Ok(value) = std::env::var(ENV_CREATE_DIRS) {
            match parse_flag(&value) {
                Some(flag) => self.create_dirs = flag,
                None => warn!(value = %value, "Unknown {} value in environment", ENV_CREATE_DIRS),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "washer", "company")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
