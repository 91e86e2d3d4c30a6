//! CLI command implementations
//!
//! Every command returns the process exit code:
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! | 0    | Success                                  |
//! | 1    | Invalid input, unknown id, or data issues |
//! | 2    | Configuration error                      |
//! | 3    | Storage error                            |
//! | 5    | Fatal error                              |

pub mod add;
pub mod check;
pub mod delete;
pub mod init;
pub mod list;
pub mod suggest;
pub mod summary;
pub mod update;
pub mod usage;
pub mod validate;

use crate::config::{load_config_or_default, VetStockConfig};
use crate::core::store::{create_blob_store, StoreManager};
use crate::domain::{Medicine, MedicineDraft, NumberInput, VetStockError};
use clap::Args;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_INVALID: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_STORAGE: i32 = 3;
pub const EXIT_FATAL: i32 = 5;

/// Maps an error to the exit code reported for it
pub fn exit_code(error: &VetStockError) -> i32 {
    match error {
        VetStockError::Validation(_) | VetStockError::NotFound(_) => EXIT_INVALID,
        VetStockError::Configuration(_) => EXIT_CONFIG,
        VetStockError::Storage(_) | VetStockError::Io(_) => EXIT_STORAGE,
        VetStockError::Serialization(_) | VetStockError::Unknown(_) => EXIT_FATAL,
    }
}

/// Prints a failed mutation and returns its exit code
pub(crate) fn report_failure(error: &VetStockError) -> i32 {
    println!("❌ {}", error.user_message());
    for message in error.validation_errors() {
        println!("   - {message}");
    }
    exit_code(error)
}

/// Loads the configuration and a loaded [`StoreManager`]
///
/// Load warnings and repairs written back during load are printed.
/// On failure the error is printed and the exit code is returned instead.
pub(crate) fn open_inventory(config_path: &str) -> Result<(VetStockConfig, StoreManager), i32> {
    let config = match load_config_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("❌ Failed to load configuration: {e}");
            return Err(EXIT_CONFIG);
        }
    };

    let store = match create_blob_store(&config.storage) {
        Ok(store) => store,
        Err(e) => {
            println!("❌ Failed to open storage: {e}");
            return Err(EXIT_STORAGE);
        }
    };

    let mut manager = StoreManager::new(store, config.storage.clone());
    let outcome = manager.load();

    if !manager.is_loaded() {
        println!(
            "❌ {}",
            outcome.error.as_deref().unwrap_or("Failed to load inventory")
        );
        return Err(EXIT_STORAGE);
    }

    if let Some(error) = &outcome.error {
        println!("⚠️  {error}");
    }
    if outcome.migrated {
        println!("ℹ️  Migrated inventory from legacy storage");
    }
    if outcome.dropped > 0 {
        println!("⚠️  Dropped {} unrecoverable record(s)", outcome.dropped);
    }
    if outcome.reassigned_ids > 0 {
        println!(
            "⚠️  Assigned new ids to {} record(s) with duplicate ids",
            outcome.reassigned_ids
        );
    }
    if outcome.repaired > 0 {
        println!("ℹ️  Repaired {} malformed record(s)", outcome.repaired);
    }
    if outcome.persisted {
        println!("ℹ️  Saved the repaired inventory");
    }

    Ok((config, manager))
}

/// Medicine fields shared by `add` and `update`
///
/// Numbers are taken as text so the record validator reports bad input the same way
/// it does for any other source.
#[derive(Args, Debug, Default, Clone)]
pub struct MedicineFields {
    /// Medicine name
    #[arg(long)]
    pub name: Option<String>,

    /// Category (unknown categories are stored as "Other")
    #[arg(long)]
    pub category: Option<String>,

    /// Maximum retail price per unit
    #[arg(long)]
    pub mrp: Option<String>,

    /// Units in stock
    #[arg(long)]
    pub quantity: Option<String>,

    /// Expiry date (YYYY-MM-DD)
    #[arg(long)]
    pub expiry: Option<String>,

    /// Purchase date (YYYY-MM-DD)
    #[arg(long)]
    pub purchase: Option<String>,

    /// Total amount paid; defaults to MRP x quantity
    #[arg(long)]
    pub total: Option<String>,

    #[arg(long)]
    pub manufacturer: Option<String>,

    #[arg(long)]
    pub batch: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

impl MedicineFields {
    /// Overlays the given fields onto `draft`
    ///
    /// When MRP or quantity is given without a total, the total is recalculated from
    /// the resulting MRP and quantity.
    pub fn apply_to(&self, mut draft: MedicineDraft) -> MedicineDraft {
        if let Some(name) = &self.name {
            draft = draft.name(name.as_str());
        }
        if let Some(category) = &self.category {
            draft = draft.category(category.as_str());
        }
        if let Some(mrp) = &self.mrp {
            draft = draft.mrp(mrp.as_str());
        }
        if let Some(quantity) = &self.quantity {
            draft = draft.quantity(quantity.as_str());
        }
        if let Some(expiry) = &self.expiry {
            draft = draft.expiry_date(expiry.as_str());
        }
        if let Some(purchase) = &self.purchase {
            draft = draft.purchase_date(purchase.as_str());
        }
        if let Some(manufacturer) = &self.manufacturer {
            draft = draft.manufacturer(manufacturer.as_str());
        }
        if let Some(batch) = &self.batch {
            draft = draft.batch_number(batch.as_str());
        }
        if let Some(description) = &self.description {
            draft = draft.description(description.as_str());
        }

        match &self.total {
            Some(total) => draft = draft.total_price_invested(total.as_str()),
            None if self.mrp.is_some() || self.quantity.is_some() => {
                if let Some(total) = derived_total(&draft) {
                    draft = draft.total_price_invested(total);
                }
            }
            None => {}
        }

        draft
    }
}

fn derived_total(draft: &MedicineDraft) -> Option<f64> {
    let mrp = number(draft.mrp.as_ref()?)?;
    let quantity = number(draft.quantity.as_ref()?)?;
    Some(((mrp * quantity) * 100.0).round() / 100.0)
}

fn number(input: &NumberInput) -> Option<f64> {
    match input {
        NumberInput::Number(n) => Some(*n),
        NumberInput::Text(text) => text.trim().parse().ok(),
    }
}

/// One-line description of a medicine for command output
pub(crate) fn describe(medicine: &Medicine) -> String {
    format!(
        "{} [{}] {} x{} @ {:.2}",
        medicine.id, medicine.category, medicine.name, medicine.quantity, medicine.mrp
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StorageError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&VetStockError::validation("bad")), EXIT_INVALID);
        assert_eq!(exit_code(&VetStockError::NotFound("x".into())), EXIT_INVALID);
        assert_eq!(
            exit_code(&VetStockError::Configuration("x".into())),
            EXIT_CONFIG
        );
        assert_eq!(
            exit_code(&VetStockError::Storage(StorageError::NotLoaded)),
            EXIT_STORAGE
        );
        assert_eq!(exit_code(&VetStockError::Unknown("x".into())), EXIT_FATAL);
    }

    #[test]
    fn test_fields_derive_total() {
        let fields = MedicineFields {
            name: Some("Carprofen".to_string()),
            mrp: Some("2.50".to_string()),
            quantity: Some("4".to_string()),
            ..Default::default()
        };
        let draft = fields.apply_to(MedicineDraft::new());
        assert_eq!(draft.name.as_deref(), Some("Carprofen"));
        assert_eq!(draft.total_price_invested, Some(NumberInput::Number(10.0)));
    }

    #[test]
    fn test_fields_explicit_total_wins() {
        let fields = MedicineFields {
            mrp: Some("2.50".to_string()),
            quantity: Some("4".to_string()),
            total: Some("9".to_string()),
            ..Default::default()
        };
        let draft = fields.apply_to(MedicineDraft::new());
        assert_eq!(
            draft.total_price_invested,
            Some(NumberInput::Text("9".to_string()))
        );
    }

    #[test]
    fn test_fields_overlay_keeps_base_values() {
        let base = MedicineDraft::new()
            .name("Carprofen")
            .mrp(2.0)
            .quantity(5u32)
            .total_price_invested(10.0);
        let fields = MedicineFields {
            quantity: Some("8".to_string()),
            ..Default::default()
        };
        let draft = fields.apply_to(base);
        assert_eq!(draft.name.as_deref(), Some("Carprofen"));
        assert_eq!(draft.total_price_invested, Some(NumberInput::Number(16.0)));
    }

    #[test]
    fn test_unparseable_numbers_leave_total_alone() {
        let fields = MedicineFields {
            mrp: Some("abc".to_string()),
            quantity: Some("4".to_string()),
            ..Default::default()
        };
        let draft = fields.apply_to(MedicineDraft::new());
        assert_eq!(draft.total_price_invested, None);
    }
}
