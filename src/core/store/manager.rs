//! Store manager: load, save, and mutate the inventory
//!
//! The manager exclusively owns the in-memory collection. Each mutation builds the next
//! collection, persists it, and only then swaps it in, so a failed save leaves both the
//! blob and the in-memory state exactly as they were.

use super::blob::{entry_size, BlobStore};
use crate::config::schema::StorageConfig;
use crate::core::integrity::consistency::price_mismatch;
use crate::core::integrity::{
    check_data_consistency, is_valid_medicine, sanitize_medicine, validate_medicines_array,
};
use crate::core::validation::fields::{iso_date, validate_id};
use crate::core::validation::record::{validate_medicine, MAX_USAGE_COUNT};
use crate::domain::catalog::VETERINARY_MEDICINE_CATEGORIES;
use crate::domain::errors::{StorageError, VetStockError};
use crate::domain::ids::MedicineId;
use crate::domain::medicine::{Medicine, MedicineDraft};
use crate::domain::Result;
use crate::{log_error_with_context, log_store_mutation};
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use std::collections::HashSet;

/// Message recorded when legacy data could not be carried over
pub const MIGRATION_FAILED: &str = "Failed to migrate old data";

/// Message for a mutation that would create a second copy of a stock item
pub const DUPLICATE_MEDICINE: &str = "Medicine with same name, batch, and expiry already exists";

/// Message for a mutation addressed to a malformed id
pub const INVALID_MEDICINE_ID: &str = "Invalid medicine ID";

/// What happened during [`StoreManager::load`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOutcome {
    /// Records in memory after loading
    pub loaded: usize,

    /// Array entries that could not be repaired and were skipped
    pub dropped: usize,

    /// Whether data was carried over from the legacy key
    pub migrated: bool,

    /// Consistency issues found before repair
    pub issues: Vec<String>,

    /// Records that failed the structural guard and were rebuilt
    pub repaired: usize,

    /// Records that received a fresh id because theirs was already taken
    pub reassigned_ids: usize,

    /// Whether the repaired collection was written back
    pub persisted: bool,

    /// User-facing error, if any; loading still succeeded unless the read failed
    pub error: Option<String>,
}

/// Owner of the inventory collection and its persisted blob
///
/// # Examples
///
/// ```
/// use vetstock::config::StorageConfig;
/// use vetstock::core::store::{MemoryBlobStore, StoreManager};
/// use vetstock::domain::MedicineDraft;
///
/// let mut manager = StoreManager::new(Box::new(MemoryBlobStore::new()), StorageConfig::default());
/// manager.load();
///
/// let draft = MedicineDraft::new().name("Carprofen").mrp(2.0).quantity(5u32).total_price_invested(10.0);
/// let id = manager.add(&draft).unwrap().id.clone();
///
/// manager.increment_usage(id.as_str()).unwrap();
/// assert_eq!(manager.medicines()[0].usage_count, Some(1));
/// ```
pub struct StoreManager {
    store: Box<dyn BlobStore>,
    config: StorageConfig,
    medicines: Vec<Medicine>,
    error: Option<String>,
    loaded: bool,
    today: Option<NaiveDate>,
}

impl StoreManager {
    /// Creates a manager over `store`; call [`load`](Self::load) before mutating
    pub fn new(store: Box<dyn BlobStore>, config: StorageConfig) -> Self {
        Self {
            store,
            config,
            medicines: Vec::new(),
            error: None,
            loaded: false,
            today: None,
        }
    }

    /// Pins the date used for validation windows and usage stamps
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Current collection
    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    /// Looks up a record by id
    pub fn get(&self, id: &str) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.id.as_str() == id)
    }

    /// Last user-facing error, cleared at the start of every operation
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Forgets the last error
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Whether [`load`](Self::load) has completed
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Storage settings in effect
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Underlying blob store
    pub fn store(&self) -> &dyn BlobStore {
        self.store.as_ref()
    }

    /// Reads the persisted collection, migrating and repairing as needed
    ///
    /// Corrupt or legacy data never fails the load: unparseable blobs count as empty,
    /// malformed records are repaired or skipped, and a failed migration is recorded as
    /// a non-fatal error. Only an unreadable current key leaves the store unloaded, so
    /// that a later save cannot overwrite data that merely failed to read. The current
    /// key is written only to complete a migration, or once after records were repaired,
    /// dropped, or given new ids, so that generated ids survive the next load.
    pub fn load(&mut self) -> LoadOutcome {
        self.error = None;
        let today = self.today();
        let mut outcome = LoadOutcome::default();

        let raw = match self.store.get(&self.config.storage_key) {
            Ok(Some(raw)) => Some(raw),
            Ok(None) => self.migrate_legacy(today, &mut outcome),
            Err(e) => {
                let e = self.fail("StoreManager::load", e);
                outcome.error = Some(e.user_message());
                return outcome;
            }
        };

        let mut medicines = Vec::new();
        if let Some(raw) = raw {
            let parsed = parse_blob(&raw, &self.config.storage_key);
            let items = parsed.as_array().map_or(&[][..], Vec::as_slice);
            let total = items.len();
            let malformed = items.iter().filter(|item| !is_valid_medicine(item)).count();

            medicines = validate_medicines_array(&parsed, today);
            outcome.dropped = total.saturating_sub(medicines.len());
            outcome.repaired = malformed.saturating_sub(outcome.dropped);

            let report = check_data_consistency(&medicines);
            if !report.is_valid() {
                outcome.issues = report.messages();
                tracing::warn!(
                    issues = ?outcome.issues,
                    "Data consistency issues found, repairing collection"
                );

                medicines = medicines
                    .iter()
                    .filter_map(|m| serde_json::to_value(m).ok())
                    .filter_map(|value| sanitize_medicine(&value, today))
                    .collect();
                outcome.reassigned_ids = reassign_duplicate_ids(&mut medicines);
            }
        }

        outcome.loaded = medicines.len();
        self.loaded = true;

        // Repaired ids are generated, so they must be written back to stay addressable
        if outcome.repaired > 0 || outcome.dropped > 0 || outcome.reassigned_ids > 0 {
            match self.save(&medicines) {
                Ok(()) => outcome.persisted = true,
                Err(e) => {
                    self.fail("StoreManager::load", e);
                }
            }
        }

        outcome.error = self.error.clone();
        self.medicines = medicines;

        tracing::info!(
            loaded = outcome.loaded,
            dropped = outcome.dropped,
            migrated = outcome.migrated,
            repaired = outcome.repaired,
            issues = outcome.issues.len(),
            "Inventory loaded"
        );

        outcome
    }

    fn migrate_legacy(&mut self, today: NaiveDate, outcome: &mut LoadOutcome) -> Option<String> {
        match self.try_migrate_legacy(today) {
            Ok(Some((json, count))) => {
                tracing::info!(
                    from = %self.config.legacy_key,
                    to = %self.config.storage_key,
                    medicines = count,
                    "Migrated legacy inventory"
                );
                outcome.migrated = true;
                Some(json)
            }
            Ok(None) => None,
            Err(e) => {
                log_error_with_context!(&e, "StoreManager::migrate_legacy");
                self.error = Some(MIGRATION_FAILED.to_string());
                None
            }
        }
    }

    fn try_migrate_legacy(&mut self, today: NaiveDate) -> Result<Option<(String, usize)>> {
        let legacy_key = self.config.legacy_key.clone();
        let Some(old) = self.store.get(&legacy_key)? else {
            return Ok(None);
        };

        let medicines = validate_medicines_array(&parse_blob(&old, &legacy_key), today);
        let json = serde_json::to_string(&medicines)?;
        self.check_capacity(medicines.len(), &json)?;
        self.store.set(&self.config.storage_key, &json)?;

        if let Err(e) = self.store.remove(&legacy_key) {
            tracing::warn!(error = %e, key = %legacy_key, "Failed to remove legacy key");
        }
        Ok(Some((json, medicines.len())))
    }

    /// Validates and appends a new record
    ///
    /// # Errors
    ///
    /// Returns a validation error for invalid fields or when a record with the same id or
    /// duplicate key exists, and a storage error if the result cannot be saved.
    pub fn add(&mut self, draft: &MedicineDraft) -> Result<&Medicine> {
        self.error = None;
        match self.try_add(draft) {
            Ok(index) => Ok(&self.medicines[index]),
            Err(e) => Err(self.fail("StoreManager::add", e)),
        }
    }

    fn try_add(&mut self, draft: &MedicineDraft) -> Result<usize> {
        self.ensure_loaded()?;

        let medicine = self.validate(draft)?;
        let key = medicine.duplicate_key();
        if self
            .medicines
            .iter()
            .any(|m| m.id == medicine.id || m.duplicate_key() == key)
        {
            return Err(VetStockError::validation(DUPLICATE_MEDICINE));
        }

        let mut next = self.medicines.clone();
        next.push(medicine);
        self.commit(next)?;

        let index = self.medicines.len() - 1;
        log_store_mutation!("add", self.medicines[index].id, self.medicines.len());
        Ok(index)
    }

    /// Replaces the record whose id matches the draft's id
    ///
    /// The draft is a complete record, not a patch; callers merging changes should start
    /// from [`MedicineDraft::from`] on the existing record.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed id, invalid fields, or a duplicate-key
    /// clash with another record; not-found when no record has the id; and a storage
    /// error if the result cannot be saved.
    pub fn update(&mut self, draft: &MedicineDraft) -> Result<&Medicine> {
        self.error = None;
        match self.try_update(draft) {
            Ok(index) => Ok(&self.medicines[index]),
            Err(e) => Err(self.fail("StoreManager::update", e)),
        }
    }

    fn try_update(&mut self, draft: &MedicineDraft) -> Result<usize> {
        self.ensure_loaded()?;

        let id = checked_id(draft.id.as_deref())?;
        let medicine = self.validate(draft)?;
        let index = self.position(&id)?;

        let key = medicine.duplicate_key();
        let clash = self
            .medicines
            .iter()
            .enumerate()
            .any(|(i, m)| i != index && m.duplicate_key() == key);
        if clash {
            return Err(VetStockError::validation(DUPLICATE_MEDICINE));
        }

        let mut next = self.medicines.clone();
        next[index] = medicine;
        self.commit(next)?;

        log_store_mutation!("update", id, self.medicines.len());
        Ok(index)
    }

    /// Removes a record and returns it
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed id, not-found when no record has the
    /// id, and a storage error if the result cannot be saved.
    pub fn delete(&mut self, id: &str) -> Result<Medicine> {
        self.error = None;
        self.try_delete(id)
            .map_err(|e| self.fail("StoreManager::delete", e))
    }

    fn try_delete(&mut self, id: &str) -> Result<Medicine> {
        self.ensure_loaded()?;

        let id = checked_id(Some(id))?;
        let index = self.position(&id)?;

        let mut next = self.medicines.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        log_store_mutation!("delete", id, self.medicines.len());
        Ok(removed)
    }

    /// Records one use: bumps `usageCount` (capped) and stamps `lastUsed` with today
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed id, not-found when no record has the
    /// id, and a storage error if the result cannot be saved.
    pub fn increment_usage(&mut self, id: &str) -> Result<&Medicine> {
        self.error = None;
        match self.try_increment_usage(id) {
            Ok(index) => Ok(&self.medicines[index]),
            Err(e) => Err(self.fail("StoreManager::increment_usage", e)),
        }
    }

    fn try_increment_usage(&mut self, id: &str) -> Result<usize> {
        self.ensure_loaded()?;

        let id = checked_id(Some(id))?;
        let index = self.position(&id)?;
        let today = iso_date(self.today());

        let mut next = self.medicines.clone();
        let medicine = &mut next[index];
        medicine.usage_count = Some(medicine.usage().saturating_add(1).min(MAX_USAGE_COUNT));
        medicine.last_used = Some(today);
        self.commit(next)?;

        log_store_mutation!("increment_usage", id, self.medicines.len());
        Ok(index)
    }

    fn validate(&self, draft: &MedicineDraft) -> Result<Medicine> {
        let medicine =
            validate_medicine(draft, VETERINARY_MEDICINE_CATEGORIES, self.today()).into_medicine()?;

        if let Some(issue) = price_mismatch(&medicine) {
            tracing::warn!(medicine_id = %medicine.id, "{issue}");
        }
        Ok(medicine)
    }

    fn position(&self, id: &MedicineId) -> Result<usize> {
        self.medicines
            .iter()
            .position(|m| &m.id == id)
            .ok_or_else(|| VetStockError::NotFound(id.to_string()))
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(StorageError::NotLoaded.into())
        }
    }

    fn commit(&mut self, next: Vec<Medicine>) -> Result<()> {
        self.save(&next)?;
        self.medicines = next;
        Ok(())
    }

    /// Persists `medicines` under the storage key after the size guards pass
    fn save(&mut self, medicines: &[Medicine]) -> Result<()> {
        self.ensure_loaded()?;

        let json = serde_json::to_string(medicines)?;
        self.check_capacity(medicines.len(), &json)?;

        self.store.set(&self.config.storage_key, &json)?;
        tracing::debug!(medicines = medicines.len(), bytes = json.len(), "Inventory saved");
        Ok(())
    }

    /// Record ceiling and byte quota for writing `json` under the storage key
    fn check_capacity(&self, count: usize, json: &str) -> Result<()> {
        if count > self.config.max_records {
            return Err(StorageError::TooManyRecords {
                count,
                max: self.config.max_records,
            }
            .into());
        }

        let key = &self.config.storage_key;
        let current = self
            .store
            .get(key)?
            .map_or(0, |existing| entry_size(key, &existing));
        let projected = self
            .store
            .total_bytes()?
            .saturating_sub(current)
            .saturating_add(entry_size(key, json));

        if projected > self.config.quota_bytes {
            return Err(StorageError::QuotaExceeded {
                projected,
                limit: self.config.quota_bytes,
            }
            .into());
        }
        Ok(())
    }

    fn fail(&mut self, context: &str, error: VetStockError) -> VetStockError {
        log_error_with_context!(&error, context);
        self.error = Some(error.user_message());
        error
    }
}

fn checked_id(id: Option<&str>) -> Result<MedicineId> {
    validate_id(id).map_err(|_| VetStockError::validation(INVALID_MEDICINE_ID))
}

fn parse_blob(raw: &str, key: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(key = %key, error = %e, "Stored inventory is not valid JSON, treating as empty");
        Value::Array(Vec::new())
    })
}

// Keeps the first holder of each id and gives later holders fresh ones.
fn reassign_duplicate_ids(medicines: &mut [Medicine]) -> usize {
    let mut seen: HashSet<MedicineId> = HashSet::new();
    let mut reassigned = 0;

    for medicine in medicines.iter_mut() {
        if seen.insert(medicine.id.clone()) {
            continue;
        }
        let mut fresh = MedicineId::generate();
        while seen.contains(&fresh) {
            fresh = MedicineId::generate();
        }
        tracing::warn!(old_id = %medicine.id, new_id = %fresh, "Reassigned duplicate id");
        medicine.id = fresh.clone();
        seen.insert(fresh);
        reassigned += 1;
    }

    reassigned
}
