//! roofsync configuration file.
//!
//! Resolved from `--config`/`ROOFSYNC_CONFIG`, else
//! `<config dir>/roofsync/config.toml`. Every field has a default, so a
//! missing file is not an error.
//!
//! ```toml
//! [remote]
//! owner = "acme-solar"
//! repo = "survey-data"
//! path = "data/properties.json"
//! write_policy = "last-writer-wins"
//!
//! [store]
//! data_dir = "/var/lib/roofsync"
//! ```

use std::path::{Path, PathBuf};

use roofsync_client::RemoteConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name used for the config and data directories.
pub const PROJECT_NAME: &str = "roofsync";

/// Local persistence settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the persisted collection and credential.
    pub data_dir: Option<PathBuf>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoofsyncConfig {
    /// Remote document settings.
    pub remote: RemoteConfig,
    /// Local store settings.
    pub store: StoreConfig,
}

impl RoofsyncConfig {
    /// `<config dir>/roofsync/config.toml`, if the platform has a config
    /// directory.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// The explicit path if given, else the default path.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit) else {
            tracing::debug!("no config directory on this platform; using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found; using defaults");
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Serialize as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Write the default configuration to `path`, creating missing parent
    /// directories. An existing file is only replaced when `force` is set.
    pub fn write_default(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(Error::config(format!(
                "{} already exists; pass --force to replace it",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
        }
        let content = Self::default().to_toml_string()?;
        std::fs::write(path, content).map_err(|e| Error::io_with_path(e, path))?;
        tracing::info!(path = %path.display(), "wrote default config");
        Ok(())
    }

    /// Directory for local data: the override, then `store.data_dir`, then
    /// `<data dir>/roofsync`.
    pub fn data_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.store.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(PROJECT_NAME))
            .ok_or_else(|| {
                Error::config("Could not determine a data directory; set store.data_dir")
            })
    }
}
