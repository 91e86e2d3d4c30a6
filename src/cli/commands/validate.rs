//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the VetStock configuration file.

use super::{EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::load_config;
use crate::config::schema::StorageBackend;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after applying overrides
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        match config.storage.backend {
            StorageBackend::File => {
                println!("  Storage Backend: file");
                println!("  Data Directory: {}", config.storage.data_dir.display());
            }
            StorageBackend::Memory => println!("  Storage Backend: memory (not persisted)"),
        }
        println!("  Storage Key: {}", config.storage.storage_key);
        println!("  Legacy Key: {}", config.storage.legacy_key);
        println!("  Quota: {} bytes", config.storage.quota_bytes);
        println!("  Max Records: {}", config.storage.max_records);
        println!(
            "  Low Stock Threshold: {}",
            config.inventory.low_stock_threshold
        );
        println!(
            "  Expiry Windows: {} days warning, {} days critical",
            config.inventory.expiry_warning_days, config.inventory.expiry_critical_days
        );
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();
        Ok(EXIT_SUCCESS)
    }
}
