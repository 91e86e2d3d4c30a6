//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{StorageBackend, VetStockConfig};
use crate::domain::errors::VetStockError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into VetStockConfig
/// 4. Applies environment variable overrides (VETSTOCK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use vetstock::config::loader::load_config;
///
/// let config = load_config("vetstock.toml").expect("Failed to load config");
/// println!("Storing under {}", config.storage.storage_key);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VetStockConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VetStockError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VetStockError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: VetStockConfig = toml::from_str(&contents)
        .map_err(|e| VetStockError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(&mut config)?;
    Ok(config)
}

/// Loads `path` if it exists, otherwise starts from defaults
///
/// Environment overrides and validation apply either way, so the CLI works without a
/// config file.
///
/// # Errors
///
/// Returns an error if an existing file is invalid or the resulting configuration
/// fails validation.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<VetStockConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = VetStockConfig::default();
    finish(&mut config)?;
    Ok(config)
}

fn finish(config: &mut VetStockConfig) -> Result<()> {
    apply_env_overrides(config)?;

    config.validate().map_err(|e| {
        VetStockError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid placeholder pattern")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_pattern();
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(VetStockError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn parse_override<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        VetStockError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}

/// Applies environment variable overrides using VETSTOCK_* prefix
///
/// Environment variables follow the pattern: VETSTOCK_<SECTION>_<KEY>
/// For example: VETSTOCK_STORAGE_DATA_DIR, VETSTOCK_INVENTORY_LOW_STOCK_THRESHOLD
fn apply_env_overrides(config: &mut VetStockConfig) -> Result<()> {
    let var = |name: &str| std::env::var(name).ok();

    // Application overrides
    if let Some(val) = var("VETSTOCK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Storage overrides
    if let Some(val) = var("VETSTOCK_STORAGE_BACKEND") {
        config.storage.backend = match val.to_lowercase().as_str() {
            "file" => StorageBackend::File,
            "memory" => StorageBackend::Memory,
            _ => {
                return Err(VetStockError::Configuration(format!(
                    "Invalid value '{val}' for VETSTOCK_STORAGE_BACKEND. Must be one of: file, memory"
                )))
            }
        };
    }
    if let Some(val) = var("VETSTOCK_STORAGE_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(val);
    }
    if let Some(val) = var("VETSTOCK_STORAGE_STORAGE_KEY") {
        config.storage.storage_key = val;
    }
    if let Some(val) = var("VETSTOCK_STORAGE_LEGACY_KEY") {
        config.storage.legacy_key = val;
    }
    if let Some(val) = var("VETSTOCK_STORAGE_QUOTA_BYTES") {
        config.storage.quota_bytes = parse_override("VETSTOCK_STORAGE_QUOTA_BYTES", &val)?;
    }
    if let Some(val) = var("VETSTOCK_STORAGE_MAX_RECORDS") {
        config.storage.max_records = parse_override("VETSTOCK_STORAGE_MAX_RECORDS", &val)?;
    }

    // Inventory overrides
    if let Some(val) = var("VETSTOCK_INVENTORY_LOW_STOCK_THRESHOLD") {
        config.inventory.low_stock_threshold =
            parse_override("VETSTOCK_INVENTORY_LOW_STOCK_THRESHOLD", &val)?;
    }
    if let Some(val) = var("VETSTOCK_INVENTORY_EXPIRY_WARNING_DAYS") {
        config.inventory.expiry_warning_days =
            parse_override("VETSTOCK_INVENTORY_EXPIRY_WARNING_DAYS", &val)?;
    }
    if let Some(val) = var("VETSTOCK_INVENTORY_EXPIRY_CRITICAL_DAYS") {
        config.inventory.expiry_critical_days =
            parse_override("VETSTOCK_INVENTORY_EXPIRY_CRITICAL_DAYS", &val)?;
    }
    if let Some(val) = var("VETSTOCK_INVENTORY_MOST_USED_LIMIT") {
        config.inventory.most_used_limit =
            parse_override("VETSTOCK_INVENTORY_MOST_USED_LIMIT", &val)?;
    }

    // Logging overrides
    if let Some(val) = var("VETSTOCK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = var("VETSTOCK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = var("VETSTOCK_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("VETSTOCK_LOADER_TEST_DIR", "/srv/clinic");
        let input = "data_dir = \"${VETSTOCK_LOADER_TEST_DIR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "data_dir = \"/srv/clinic\"");
        std::env::remove_var("VETSTOCK_LOADER_TEST_DIR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("VETSTOCK_LOADER_MISSING");
        let input = "data_dir = \"${VETSTOCK_LOADER_MISSING}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("VETSTOCK_LOADER_MISSING"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# data_dir = \"${VETSTOCK_LOADER_COMMENTED}\"\nlog_level = \"info\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_parse_override_rejects_garbage() {
        assert_eq!(parse_override::<usize>("X", " 42 ").unwrap(), 42);
        assert!(parse_override::<usize>("X", "lots").is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-vetstock.toml");
        assert!(matches!(result, Err(VetStockError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[storage]
backend = "memory"
storage_key = "clinic_stock"

[inventory]
low_stock_threshold = 5
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.storage_key, "clinic_stock");
        assert_eq!(config.storage.legacy_key, "medicines");
        assert_eq!(config.inventory.low_stock_threshold, 5);
        assert_eq!(config.inventory.expiry_warning_days, 30);
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.storage.max_records, 10_000);
    }
}
