//! Configuration management for VetStock.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! VetStock uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `VETSTOCK_<SECTION>_<KEY>` overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vetstock::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vetstock.toml")?;
//!
//! println!("Data directory: {}", config.storage.data_dir.display());
//! println!("Low stock at: {}", config.inventory.low_stock_threshold);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`StorageConfig`] - Backend, keys, quota, and record ceiling
//! - [`InventoryConfig`] - Report thresholds
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [storage]
//! backend = "file"
//! data_dir = "${VETSTOCK_DATA}"
//! quota_bytes = 5242880
//!
//! [inventory]
//! low_stock_threshold = 10
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, InventoryConfig, LoggingConfig, StorageBackend, StorageConfig,
    VetStockConfig,
};
