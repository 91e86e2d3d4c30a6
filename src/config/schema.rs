//! Configuration schema types
//!
//! This module defines the configuration structure for VetStock. Every section and
//! field has a default, so an empty file is a valid configuration.

use crate::domain::ids::check_id_format;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Blob store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key under `data_dir`
    #[default]
    File,
    /// Process-local map; nothing survives exit
    Memory,
}

/// Main VetStock configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VetStockConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Blob store settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Inventory report thresholds
    #[serde(default)]
    pub inventory: InventoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VetStockConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.storage.validate()?;
        self.inventory.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Blob store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend used by the CLI
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory holding one `<key>.json` file per key (file backend)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Key the collection is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Key older versions used; migrated once, then removed
    #[serde(default = "default_legacy_key")]
    pub legacy_key: String,

    /// Byte budget for all keys combined
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,

    /// Maximum number of records in the collection
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        for (field, key) in [
            ("storage_key", &self.storage_key),
            ("legacy_key", &self.legacy_key),
        ] {
            if key.is_empty() {
                return Err(format!("storage.{field} cannot be empty"));
            }
            if check_id_format(key).is_err() {
                return Err(format!(
                    "storage.{field} '{key}' may only contain letters, digits, '-' and '_'"
                ));
            }
        }

        if self.storage_key == self.legacy_key {
            return Err("storage.legacy_key must differ from storage.storage_key".to_string());
        }

        if self.quota_bytes == 0 {
            return Err("storage.quota_bytes must be > 0".to_string());
        }

        if self.max_records == 0 {
            return Err("storage.max_records must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
            legacy_key: default_legacy_key(),
            quota_bytes: default_quota_bytes(),
            max_records: default_max_records(),
        }
    }
}

/// Thresholds used by inventory reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Quantity at or below which stock counts as low
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,

    /// Days before expiry at which a warning is shown
    #[serde(default = "default_expiry_warning_days")]
    pub expiry_warning_days: i64,

    /// Days before expiry at which stock counts as expiring
    #[serde(default = "default_expiry_critical_days")]
    pub expiry_critical_days: i64,

    /// Rows shown in the most-used report
    #[serde(default = "default_most_used_limit")]
    pub most_used_limit: usize,
}

impl InventoryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.expiry_critical_days < 0 || self.expiry_warning_days < 0 {
            return Err("inventory expiry thresholds must be >= 0".to_string());
        }

        if self.expiry_critical_days > self.expiry_warning_days {
            return Err(format!(
                "inventory.expiry_critical_days ({}) must not exceed inventory.expiry_warning_days ({})",
                self.expiry_critical_days, self.expiry_warning_days
            ));
        }

        if self.most_used_limit == 0 {
            return Err("inventory.most_used_limit must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: default_low_stock_threshold(),
            expiry_warning_days: default_expiry_warning_days(),
            expiry_critical_days: default_expiry_critical_days(),
            most_used_limit: default_most_used_limit(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_storage_key() -> String {
    "veterinary_medicines".to_string()
}

fn default_legacy_key() -> String {
    "medicines".to_string()
}

fn default_quota_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_max_records() -> usize {
    10_000
}

fn default_low_stock_threshold() -> u32 {
    10
}

fn default_expiry_warning_days() -> i64 {
    30
}

fn default_expiry_critical_days() -> i64 {
    15
}

fn default_most_used_limit() -> usize {
    10
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
