//! Application and driver configuration

use anyhow::Result;
use omnik_sens_drivers::{DriverFamily, DriverSettings};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

/// Application-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Configured driver units, in declaration order
    #[serde(default)]
    pub drivers: Vec<DriverConfig>,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl AppConfig {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error and yields an empty configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            log::info!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "omnik-sens", "omnik-sens")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        Self::load_from_str(&content)
    }

    /// Parse configuration from a JSON document
    pub fn load_from_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        if config.version > CONFIG_VERSION {
            log::warn!(
                "Config version {} is newer than supported version {}",
                config.version,
                CONFIG_VERSION
            );
        }
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            drivers: Vec::new(),
        }
    }
}

/// One configured driver unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Unique id; generated when absent
    #[serde(default)]
    pub id: Option<String>,
    pub family: DriverFamily,
    /// UART bus the driver reads from
    pub uart_id: String,
    /// Field key -> raw override object, validated during configuration
    #[serde(default)]
    pub sensors: HashMap<String, Value>,
}

impl DriverConfig {
    /// Resolve the driver settings, generating an id if none was given
    pub fn settings(&self) -> DriverSettings {
        let id = self
            .id
            .clone()
            .unwrap_or_else(|| format!("omnik_{}", uuid::Uuid::new_v4().simple()));
        DriverSettings::new(id, self.uart_id.clone())
    }
}
