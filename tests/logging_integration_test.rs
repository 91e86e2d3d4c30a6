//! Integration tests for logging functionality

use vetstock::config::LoggingConfig;
use vetstock::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.local_path, "logs");
}

// The global subscriber can only be installed once per process, so installation and the
// second-install failure are checked in one test.
#[test]
fn test_file_logging_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).unwrap();
    assert!(guard.has_file_writer());
    assert!(log_path.is_dir());

    tracing::info!(target: "vetstock::inventory", medicine_id = "m1", "Inventory updated");

    let second = init_logging("info", &LoggingConfig::default());
    assert!(second.is_err());

    drop(guard);

    let contents: String = std::fs::read_dir(&log_path)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with("vetstock.log")
        })
        .map(|entry| std::fs::read_to_string(entry.path()).unwrap())
        .collect();

    let line = contents
        .lines()
        .find(|line| line.contains("Inventory updated"))
        .expect("mutation line written");
    let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(parsed["fields"]["medicine_id"], "m1");
}
