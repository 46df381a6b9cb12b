//! XDG Base Directory resolution.
//!
//! Folio keeps its config file under the XDG config home and its document
//! tree under the XDG data home. Explicit `FOLIO_*` variables win over the
//! `XDG_*` ones, which win over the `~/.config` / `~/.local/share` defaults.

use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "folio";

/// Resolved directories for Folio
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl XdgDirs {
    /// Resolve directories from the environment
    ///
    /// Priority order (highest to lowest):
    /// 1. `FOLIO_CONFIG_DIR` / `FOLIO_DATA_DIR`
    /// 2. `XDG_CONFIG_HOME` / `XDG_DATA_HOME`
    /// 3. `~/.config/folio` / `~/.local/share/folio`
    pub fn new() -> Self {
        Self {
            config_dir: resolve("FOLIO_CONFIG_DIR", "XDG_CONFIG_HOME", &[".config"]),
            data_dir: resolve("FOLIO_DATA_DIR", "XDG_DATA_HOME", &[".local", "share"]),
        }
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        if let Ok(file) = env::var("FOLIO_CONFIG_FILE") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }

    /// Default document tree root
    pub fn documents_dir(&self) -> PathBuf {
        self.data_dir.join("documents")
    }

    /// Create the config and data directories if they don't exist
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    pub fn log_paths(&self) {
        tracing::info!("XDG directories resolved:");
        tracing::info!("  Config: {:?}", self.config_dir);
        tracing::info!("  Data: {:?}", self.data_dir);
        tracing::info!("  Config file: {:?}", self.config_file());
        tracing::info!("  Documents: {:?}", self.documents_dir());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve(folio_var: &str, xdg_var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(dir) = env::var(folio_var) {
        return PathBuf::from(dir);
    }

    if let Ok(xdg) = env::var(xdg_var) {
        return PathBuf::from(xdg).join(APP_DIR);
    }

    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    for part in home_default {
        path.push(part);
    }
    path.join(APP_DIR)
}
