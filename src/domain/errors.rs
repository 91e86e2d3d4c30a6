//! Domain error types
//!
//! This module defines the error hierarchy for VetStock. Field-level problems are
//! collected into [`VetStockError::Validation`]; store-level failures are raised at the
//! mutation boundary and carry a short user-facing message alongside the full detail.

use thiserror::Error;

/// Main VetStock error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum VetStockError {
    /// One or more fields failed validation (user-correctable)
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Persisting or reading the blob store failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The mutation target does not exist
    #[error("Medicine not found: {0}")]
    NotFound(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Anything unexpected
    #[error("{0}")]
    Unknown(String),
}

impl VetStockError {
    /// Convenience constructor for a single validation message
    pub fn validation(message: impl Into<String>) -> Self {
        VetStockError::Validation(vec![message.into()])
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            VetStockError::Validation(_) => "VALIDATION_ERROR",
            VetStockError::Storage(_) => "STORAGE_ERROR",
            VetStockError::NotFound(_) => "NOT_FOUND",
            VetStockError::Configuration(_) => "CONFIGURATION_ERROR",
            VetStockError::Serialization(_) | VetStockError::Io(_) | VetStockError::Unknown(_) => {
                "UNKNOWN_ERROR"
            }
        }
    }

    /// Message suitable for showing to the person using the inventory
    ///
    /// Validation errors list every failing field; storage errors collapse into a
    /// single sentence; anything unexpected gets a generic message.
    pub fn user_message(&self) -> String {
        match self {
            VetStockError::Validation(errors) => format!("Invalid input: {}", errors.join(", ")),
            VetStockError::Storage(err) => err.user_message().to_string(),
            VetStockError::NotFound(_) => "Medicine not found".to_string(),
            VetStockError::Configuration(msg) => format!("Configuration problem: {msg}"),
            VetStockError::Serialization(_) | VetStockError::Io(_) | VetStockError::Unknown(_) => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }

    /// Validation messages carried by this error, if any
    pub fn validation_errors(&self) -> &[String] {
        match self {
            VetStockError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

/// Blob store errors
///
/// These errors don't expose the underlying store implementation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the blob would exceed the byte budget
    #[error("Storage quota exceeded: projected {projected} bytes, limit {limit} bytes")]
    QuotaExceeded { projected: usize, limit: usize },

    /// Collection is larger than the configured ceiling
    #[error("Too many medicines: {count} (maximum {max} allowed)")]
    TooManyRecords { count: usize, max: usize },

    /// Writing a key failed
    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// Reading a key failed
    #[error("Failed to read '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Mutation attempted before the collection was loaded
    #[error("Store has not been loaded")]
    NotLoaded,
}

impl StorageError {
    /// Message suitable for showing to the person using the inventory
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::QuotaExceeded { .. } => {
                "Storage quota exceeded. Please delete some data."
            }
            StorageError::TooManyRecords { .. } => {
                "Too many medicines stored. Please delete some entries."
            }
            StorageError::WriteFailed { .. } => "Failed to save data. Storage may be full.",
            StorageError::ReadFailed { .. } => "Failed to read saved data.",
            StorageError::NotLoaded => "Inventory has not been loaded yet.",
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for VetStockError {
    fn from(err: std::io::Error) -> Self {
        VetStockError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VetStockError {
    fn from(err: serde_json::Error) -> Self {
        VetStockError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VetStockError {
    fn from(err: toml::de::Error) -> Self {
        VetStockError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = VetStockError::Validation(vec![
            "MRP: Invalid number format".to_string(),
            "Quantity: Value cannot be negative".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: MRP: Invalid number format, Quantity: Value cannot be negative"
        );
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_storage_error_conversion() {
        let storage_err = StorageError::TooManyRecords {
            count: 10_001,
            max: 10_000,
        };
        let err: VetStockError = storage_err.into();
        assert!(matches!(
            err,
            VetStockError::Storage(StorageError::TooManyRecords { .. })
        ));
        assert_eq!(err.code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_user_messages() {
        let quota: VetStockError = StorageError::QuotaExceeded {
            projected: 6_000_000,
            limit: 5_242_880,
        }
        .into();
        assert_eq!(
            quota.user_message(),
            "Storage quota exceeded. Please delete some data."
        );

        let not_found = VetStockError::NotFound("abc".to_string());
        assert_eq!(not_found.user_message(), "Medicine not found");
        assert_eq!(not_found.to_string(), "Medicine not found: abc");

        let unknown = VetStockError::Unknown("boom".to_string());
        assert_eq!(
            unknown.user_message(),
            "An unexpected error occurred. Please try again."
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: VetStockError = io_err.into();
        assert!(matches!(err, VetStockError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: VetStockError = json_err.into();
        assert!(matches!(err, VetStockError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: VetStockError = toml_err.into();
        assert!(matches!(err, VetStockError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = VetStockError::validation("Test error");
        let _: &dyn std::error::Error = &err;
        let err = StorageError::NotLoaded;
        let _: &dyn std::error::Error = &err;
    }
}
