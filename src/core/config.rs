//! Configuration management for Folio.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with defaults for every setting.

use crate::core::cache::CacheLimits;
use crate::core::error::{FolioError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub maintenance: MaintenanceConfig,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root of the document tree
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,
}

/// Content cache configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Total byte budget across cached bodies
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: usize,

    /// Entry lifetime in milliseconds
    #[serde(default = "default_max_age_ms")]
    pub max_age_ms: u64,

    /// Maximum cached bodies (0 disables caching)
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

/// Description preview configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PreviewConfig {
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

/// Consistency scan configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MaintenanceConfig {
    /// Directories inspected concurrently per batch
    #[serde(default = "default_scan_batch_size")]
    pub scan_batch_size: usize,
}

// Default value functions
fn default_root_dir() -> PathBuf {
    PathBuf::from("./documents")
}

fn default_max_size_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_max_age_ms() -> u64 {
    30 * 60 * 1000
}

fn default_max_items() -> usize {
    500
}

fn default_max_words() -> usize {
    50
}

fn default_scan_batch_size() -> usize {
    10
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: default_max_size_bytes(),
            max_age_ms: default_max_age_ms(),
            max_items: default_max_items(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_words: default_max_words(),
        }
    }
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            scan_batch_size: default_scan_batch_size(),
        }
    }
}

impl CacheConfig {
    pub fn limits(&self) -> CacheLimits {
        CacheLimits {
            max_size_bytes: self.max_size_bytes,
            max_age: Duration::from_millis(self.max_age_ms),
            max_items: self.max_items,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            FolioError::ConfigError(format!("Failed to read config file {path:?}: {e}"))
        })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// File lookup order:
    /// 1. `FOLIO_CONFIG` env var
    /// 2. XDG config file (~/.config/folio/config.toml)
    /// 3. ./folio.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("FOLIO_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("folio.toml").exists() {
                Self::from_file("folio.toml")?
            } else {
                Self::default()
            }
        };

        // An unset root lands in the XDG data directory
        if config.storage.root_dir == default_root_dir() {
            config.storage.root_dir = xdg.documents_dir();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn merge_env(&mut self) {
        if let Ok(root) = env::var("FOLIO_ROOT_DIR") {
            self.storage.root_dir = PathBuf::from(root);
        }

        override_from_env("FOLIO_CACHE_MAX_SIZE_BYTES", &mut self.cache.max_size_bytes);
        override_from_env("FOLIO_CACHE_MAX_AGE_MS", &mut self.cache.max_age_ms);
        override_from_env("FOLIO_CACHE_MAX_ITEMS", &mut self.cache.max_items);
        override_from_env("FOLIO_PREVIEW_MAX_WORDS", &mut self.preview.max_words);
        override_from_env(
            "FOLIO_SCAN_BATCH_SIZE",
            &mut self.maintenance.scan_batch_size,
        );
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.storage.root_dir.as_os_str().is_empty() {
            return Err(FolioError::ConfigError(
                "Storage root directory must not be empty".to_string(),
            ));
        }

        if self.cache.max_age_ms == 0 {
            return Err(FolioError::ConfigError(
                "Cache max age must be non-zero".to_string(),
            ));
        }

        if self.preview.max_words == 0 {
            return Err(FolioError::ConfigError(
                "Preview max words must be non-zero".to_string(),
            ));
        }

        if self.maintenance.scan_batch_size == 0 {
            return Err(FolioError::ConfigError(
                "Scan batch size must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Root dir: {:?}", self.storage.root_dir);
        tracing::info!("  Cache max size: {} bytes", self.cache.max_size_bytes);
        tracing::info!("  Cache max age: {} ms", self.cache.max_age_ms);
        tracing::info!("  Cache max items: {}", self.cache.max_items);
        tracing::info!("  Preview max words: {}", self.preview.max_words);
        tracing::info!(
            "  Scan batch size: {}",
            self.maintenance.scan_batch_size
        );
    }
}

fn override_from_env<T: FromStr>(var: &str, target: &mut T) {
    if let Ok(raw) = env::var(var) {
        match raw.parse() {
            Ok(value) => *target = value,
            Err(_) => tracing::warn!("Ignoring invalid value for {}: {:?}", var, raw),
        }
    }
}
