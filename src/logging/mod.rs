//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Human-readable console output on stderr
//! - JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use vetstock::logging::init_logging;
//! use vetstock::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Inventory opened");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use vetstock::log_error_with_context;
/// use vetstock::domain::VetStockError;
///
/// let error = VetStockError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            code = $error.code(),
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a committed store mutation
///
/// # Example
///
/// ```no_run
/// use vetstock::log_store_mutation;
///
/// let id = "1718000000000abc123def";
/// log_store_mutation!("add", id, 12);
/// ```
#[macro_export]
macro_rules! log_store_mutation {
    ($operation:expr, $id:expr, $total:expr) => {
        tracing::info!(
            operation = $operation,
            medicine_id = %$id,
            total_medicines = $total,
            "Inventory updated"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::VetStockError;

    #[test]
    fn test_macros_expand_without_subscriber() {
        let error = VetStockError::NotFound("m1".to_string());
        log_error_with_context!(&error, "Failed to delete medicine");
        log_store_mutation!("delete", "m1", 0usize);
    }
}
