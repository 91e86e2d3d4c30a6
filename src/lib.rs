// VetStock - Veterinary Medicine Inventory
// Copyright (c) 2025 VetStock Contributors
// Licensed under the MIT License

//! # VetStock - Veterinary Medicine Inventory
//!
//! VetStock keeps a veterinary clinic's medicine stock in a small key/value blob store
//! and guards every read and write so the collection stays well formed.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Validating** untrusted medicine input field by field, with sanitized output
//! - **Repairing** stored data that is malformed, truncated, or from older versions
//! - **Storing** the collection under a byte quota and record limit, all-or-nothing
//! - **Reporting** expiry status, low stock, usage, and investment totals
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (validation, integrity, store, inventory, search)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vetstock::config::load_config_or_default;
//! use vetstock::core::store::{create_blob_store, StoreManager};
//! use vetstock::domain::MedicineDraft;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("vetstock.toml")?;
//!     let store = create_blob_store(&config.storage)?;
//!
//!     let mut manager = StoreManager::new(store, config.storage.clone());
//!     let outcome = manager.load();
//!     println!("Loaded {} medicines", outcome.loaded);
//!
//!     let draft = MedicineDraft::new()
//!         .name("Amoxicillin")
//!         .category("Antibiotics")
//!         .mrp("12.50")
//!         .quantity(10u32)
//!         .total_price_invested(125.0)
//!         .expiry_date("2027-06-30");
//!     manager.add(&draft)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Validation
//!
//! Drafts are checked field by field and every problem is reported at once:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use vetstock::core::validation::validate_medicine;
//! use vetstock::domain::MedicineDraft;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
//! let draft = MedicineDraft::new().name("").mrp("-1").quantity(5u32);
//! let result = validate_medicine(&draft, &[], today);
//!
//! assert!(!result.is_valid());
//! assert!(result.errors.iter().any(|e| e.starts_with("MRP:")));
//! ```
//!
//! ## Error Handling
//!
//! VetStock uses the [`domain::VetStockError`] type for all errors:
//!
//! ```rust,no_run
//! use vetstock::domain::VetStockError;
//!
//! fn example() -> Result<(), VetStockError> {
//!     let config = vetstock::config::load_config("vetstock.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! VetStock uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(total_medicines = 12, "Inventory loaded");
//! warn!(medicine_id = "m1", "Price mismatch");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
