//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ESTOQUE_OFFLINE=true                                               │
//! │     ESTOQUE_SYNC_LATENCY_MS=500                                        │
//! │     ESTOQUE_REPLENISHMENT=10                                           │
//! │     ESTOQUE_STORE_NAME="Mercado Central"                               │
//! │     ESTOQUE_EXPIRY_WARNING_DAYS=15                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/estoque/estoque.toml (Linux)                             │
//! │     ~/Library/Application Support/app.estoque.estoque/estoque.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Mercado Central"
//!
//! [restock]
//! default_list_name = "Lista de Reposição"
//! default_replenishment = 5
//! expiry_warning_days = 30
//!
//! [sync]
//! start_offline = false
//! simulated_latency_ms = 2000
//! auto_sync_on_reconnect = true
//! ```

use std::path::PathBuf;

use estoque_core::{DEFAULT_LIST_NAME, DEFAULT_REPLENISHMENT, EXPIRY_WARNING_DAYS};
use estoque_sync::SyncSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoConfigPath,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store name shown in the header and on reports.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Mercado Central".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: default_store_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockConfig {
    /// Name given to lists saved with a blank name.
    #[serde(default = "default_list_name")]
    pub default_list_name: String,

    /// Units above `min_stock` a product is set to when marked as restocked
    /// without an explicit quantity.
    #[serde(default = "default_replenishment")]
    pub default_replenishment: i64,

    /// Batches expiring within this many days are flagged.
    #[serde(default = "default_warning_days")]
    pub expiry_warning_days: i64,
}

fn default_list_name() -> String {
    DEFAULT_LIST_NAME.to_string()
}
fn default_replenishment() -> i64 {
    DEFAULT_REPLENISHMENT
}
fn default_warning_days() -> i64 {
    EXPIRY_WARNING_DAYS
}

impl Default for RestockConfig {
    fn default() -> Self {
        RestockConfig {
            default_list_name: default_list_name(),
            default_replenishment: default_replenishment(),
            expiry_warning_days: default_warning_days(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub restock: RestockConfig,

    #[serde(default)]
    pub sync: SyncSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (estoque.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
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
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }
        if self.restock.default_list_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "restock.default_list_name must not be empty".into(),
            ));
        }
        if self.restock.default_replenishment < 0 {
            return Err(ConfigError::Invalid(format!(
                "restock.default_replenishment must be >= 0, got {}",
                self.restock.default_replenishment
            )));
        }
        if self.restock.expiry_warning_days < 0 {
            return Err(ConfigError::Invalid(format!(
                "restock.expiry_warning_days must be >= 0, got {}",
                self.restock.expiry_warning_days
            )));
        }
        self.sync
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup` (the process environment in
    /// production). Unparseable values are logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(offline) = lookup("ESTOQUE_OFFLINE") {
            match offline.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.sync.start_offline = true,
                "0" | "false" | "no" => self.sync.start_offline = false,
                _ => warn!(value = %offline, "Unknown ESTOQUE_OFFLINE value"),
            }
        }

        if let Some(latency) = lookup("ESTOQUE_SYNC_LATENCY_MS") {
            match latency.trim().parse::<u64>() {
                Ok(ms) => {
                    debug!(latency_ms = ms, "Overriding sync latency from environment");
                    self.sync.simulated_latency_ms = ms;
                }
                Err(_) => warn!(value = %latency, "Invalid ESTOQUE_SYNC_LATENCY_MS"),
            }
        }

        if let Some(qty) = lookup("ESTOQUE_REPLENISHMENT") {
            match qty.trim().parse::<i64>() {
                Ok(q) => self.restock.default_replenishment = q,
                Err(_) => warn!(value = %qty, "Invalid ESTOQUE_REPLENISHMENT"),
            }
        }

        if let Some(name) = lookup("ESTOQUE_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(days) = lookup("ESTOQUE_EXPIRY_WARNING_DAYS") {
            match days.trim().parse::<i64>() {
                Ok(d) => self.restock.expiry_warning_days = d,
                Err(_) => warn!(value = %days, "Invalid ESTOQUE_EXPIRY_WARNING_DAYS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("app", "estoque", "estoque")
            .map(|dirs| dirs.config_dir().join("estoque.toml"))
    }
}
