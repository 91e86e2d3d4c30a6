//! Domain models and types for VetStock.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **The record** ([`Medicine`]) and its untrusted input shape ([`MedicineDraft`])
//! - **A validated identifier** ([`MedicineId`])
//! - **Static reference data** ([`catalog`]): categories and medicine names
//! - **Error types** ([`VetStockError`], [`StorageError`]) and the [`Result`] alias
//!
//! # Type Safety
//!
//! Identifiers are validated on construction and on deserialization, so a
//! [`Medicine`] read from JSON can never carry a malformed id:
//!
//! ```rust
//! use vetstock::domain::MedicineId;
//!
//! assert!(MedicineId::new("batch-42_a").is_ok());
//! assert!(MedicineId::new("42; DROP").is_err());
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, VetStockError>`]:
//!
//! ```rust
//! use vetstock::domain::{Result, VetStockError};
//!
//! fn example() -> Result<()> {
//!     Err(VetStockError::NotFound("abc".to_string()))
//! }
//! assert!(example().is_err());
//! ```

pub mod catalog;
pub mod errors;
pub mod ids;
pub mod medicine;
pub mod result;

// Re-export commonly used types for convenience
pub use catalog::{DEFAULT_CATEGORY, VETERINARY_MEDICINES, VETERINARY_MEDICINE_CATEGORIES};
pub use errors::{StorageError, VetStockError};
pub use ids::MedicineId;
pub use medicine::{DuplicateKey, Medicine, MedicineDraft, NumberInput};
pub use result::Result;
