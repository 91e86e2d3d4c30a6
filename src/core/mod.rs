//! Core business logic for VetStock.
//!
//! # Modules
//!
//! - [`validation`] - Field and record validators for untrusted input
//! - [`integrity`] - Structural guard, repair, and consistency checks for stored data
//! - [`store`] - Blob storage and the [`StoreManager`](store::StoreManager)
//! - [`inventory`] - Read-only queries and the summary report
//! - [`search`] - Medicine name suggestions
//!
//! # Data Flow
//!
//! 1. **Load**: read the blob (migrating from the legacy key if needed)
//! 2. **Repair**: guard and sanitize every record, then check consistency
//! 3. **Mutate**: validate the draft, build the next collection
//! 4. **Save**: enforce record and byte limits, write, then commit in memory
//!
//! # Example
//!
//! ```rust
//! use vetstock::config::StorageConfig;
//! use vetstock::core::store::{MemoryBlobStore, StoreManager};
//! use vetstock::domain::MedicineDraft;
//!
//! let mut manager = StoreManager::new(Box::new(MemoryBlobStore::new()), StorageConfig::default());
//! let outcome = manager.load();
//! assert_eq!(outcome.loaded, 0);
//!
//! let draft = MedicineDraft::new()
//!     .name("Fenbendazole")
//!     .category("Deworming")
//!     .mrp("3.20")
//!     .quantity(10u32)
//!     .total_price_invested(32.0);
//! manager.add(&draft).unwrap();
//! assert_eq!(manager.medicines().len(), 1);
//! ```

pub mod integrity;
pub mod inventory;
pub mod search;
pub mod store;
pub mod validation;
