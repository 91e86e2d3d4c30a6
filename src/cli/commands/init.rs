//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "vetstock.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing VetStock configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: vetstock validate-config");
                println!("  3. Add stock: vetstock add --name Amoxicillin --mrp 12.5 --quantity 10");
                println!("  4. Review stock: vetstock summary");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# VetStock Configuration File

[application]
log_level = "info"

[storage]
backend = "file"
data_dir = "data"

[inventory]
low_stock_threshold = 10

[logging]
local_enabled = false
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# VetStock Configuration File
# Veterinary medicine inventory
#
# Every value below is optional; the defaults are shown.
# Values may reference environment variables with ${VAR_NAME}, and any field can be
# overridden with VETSTOCK_<SECTION>_<FIELD>, e.g. VETSTOCK_STORAGE_DATA_DIR.

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[storage]
# Backend: "file" keeps one JSON document per key under data_dir,
# "memory" keeps nothing after the process exits
backend = "file"
data_dir = "data"

# Key holding the medicine collection
storage_key = "veterinary_medicines"

# Key used by older versions; migrated on first load, then removed
legacy_key = "medicines"

# Byte budget across all keys (5 MiB)
quota_bytes = 5242880

# Largest collection that will be saved
max_records = 10000

[inventory]
# Quantity at or below which a medicine is low on stock
low_stock_threshold = 10

# Days before expiry for the warning and critical windows
expiry_warning_days = 30
expiry_critical_days = 15

# Rows shown in the most-used report
most_used_limit = 10

[logging]
# Structured JSON logs written to local_path
local_enabled = false
local_path = "logs"

# Rotation: daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VetStockConfig;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "vetstock.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "vetstock.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        assert!(config.contains("[application]"));
        assert!(config.contains("[storage]"));
        assert!(config.contains("[inventory]"));
    }

    #[test]
    fn test_generated_configs_parse_and_validate() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: VetStockConfig = toml::from_str(&content).unwrap();
            config.validate().unwrap();
            assert_eq!(config.storage.storage_key, "veterinary_medicines");
        }
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("vetstock.toml");
        std::fs::write(&output, "# existing").unwrap();

        let mut args = InitArgs {
            output: output.to_string_lossy().into_owned(),
            with_examples: true,
            force: false,
        };
        assert_eq!(args.execute().unwrap(), EXIT_CONFIG);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "# existing");

        args.force = true;
        assert_eq!(args.execute().unwrap(), EXIT_SUCCESS);
        assert!(std::fs::read_to_string(&output)
            .unwrap()
            .contains("legacy_key"));
    }
}
