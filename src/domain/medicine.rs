//! Medicine domain model
//!
//! [`Medicine`] is the persisted record; [`MedicineDraft`] is the untrusted shape that
//! arrives from a form, the command line, or an older blob, before validation.

use super::ids::MedicineId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A validated inventory record
///
/// Serialized with camelCase keys; absent optional fields are omitted. An empty
/// `expiry_date` means the medicine has no recorded expiry.
///
/// # Examples
///
/// ```
/// use vetstock::domain::medicine::Medicine;
///
/// let json = r#"{
///     "id": "m1", "name": "Carprofen", "category": "Pain Relief & Anti-inflammatory",
///     "mrp": 12.5, "quantity": 4, "expiryDate": "2027-01-31",
///     "purchaseDate": "2026-01-01", "totalPriceInvested": 50.0
/// }"#;
/// let medicine: Medicine = serde_json::from_str(json).unwrap();
/// assert_eq!(medicine.quantity, 4);
/// assert!(medicine.batch_number.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub category: String,
    /// Unit price
    pub mrp: f64,
    pub quantity: u32,
    pub expiry_date: String,
    pub purchase_date: String,
    pub total_price_invested: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<String>,
}

impl Medicine {
    /// Key under which two records count as the same stock item
    pub fn duplicate_key(&self) -> DuplicateKey {
        DuplicateKey::new(
            &self.name,
            self.batch_number.as_deref(),
            &self.expiry_date,
        )
    }

    /// Parsed expiry date, if one is recorded and well-formed
    pub fn expiry(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.expiry_date)
    }

    /// Parsed purchase date, if well-formed
    pub fn purchase(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.purchase_date)
    }

    /// Usage count, treating an absent count as zero
    pub fn usage(&self) -> u32 {
        self.usage_count.unwrap_or(0)
    }
}

fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Domain-level identity of a stock item: lowercased name, batch, and expiry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    pub name: String,
    pub batch_number: Option<String>,
    pub expiry_date: String,
}

impl DuplicateKey {
    /// Builds a key; a missing batch number never matches a present one
    pub fn new(name: &str, batch_number: Option<&str>, expiry_date: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            batch_number: batch_number.map(str::to_string),
            expiry_date: expiry_date.to_string(),
        }
    }
}

/// A numeric field as typed by a person or stored by older versions
///
/// Accepts either a JSON number or a string such as `"12.50"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl From<f64> for NumberInput {
    fn from(value: f64) -> Self {
        NumberInput::Number(value)
    }
}

impl From<u32> for NumberInput {
    fn from(value: u32) -> Self {
        NumberInput::Number(f64::from(value))
    }
}

impl From<&str> for NumberInput {
    fn from(value: &str) -> Self {
        NumberInput::Text(value.to_string())
    }
}

impl From<String> for NumberInput {
    fn from(value: String) -> Self {
        NumberInput::Text(value)
    }
}

/// Unvalidated medicine input
///
/// Every field is optional; the record validator decides which absences are errors and
/// which get defaults. The setters follow the builder pattern.
///
/// # Examples
///
/// ```
/// use vetstock::domain::medicine::MedicineDraft;
///
/// let draft = MedicineDraft::new()
///     .name("Amoxicillin")
///     .category("Antibiotics")
///     .mrp("12.50")
///     .quantity(10u32)
///     .total_price_invested(125.0);
/// assert_eq!(draft.name.as_deref(), Some("Amoxicillin"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicineDraft {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub mrp: Option<NumberInput>,
    pub quantity: Option<NumberInput>,
    pub expiry_date: Option<String>,
    pub purchase_date: Option<String>,
    pub total_price_invested: Option<NumberInput>,
    pub manufacturer: Option<String>,
    pub batch_number: Option<String>,
    pub description: Option<String>,
    pub usage_count: Option<NumberInput>,
    pub last_used: Option<String>,
}

impl MedicineDraft {
    /// Creates an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the unit price
    pub fn mrp(mut self, mrp: impl Into<NumberInput>) -> Self {
        self.mrp = Some(mrp.into());
        self
    }

    /// Sets the quantity
    pub fn quantity(mut self, quantity: impl Into<NumberInput>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    /// Sets the expiry date
    pub fn expiry_date(mut self, date: impl Into<String>) -> Self {
        self.expiry_date = Some(date.into());
        self
    }

    /// Sets the purchase date
    pub fn purchase_date(mut self, date: impl Into<String>) -> Self {
        self.purchase_date = Some(date.into());
        self
    }

    /// Sets the total amount invested
    pub fn total_price_invested(mut self, total: impl Into<NumberInput>) -> Self {
        self.total_price_invested = Some(total.into());
        self
    }

    /// Sets the manufacturer
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    /// Sets the batch number
    pub fn batch_number(mut self, batch: impl Into<String>) -> Self {
        self.batch_number = Some(batch.into());
        self
    }

    /// Sets the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the usage count
    pub fn usage_count(mut self, count: impl Into<NumberInput>) -> Self {
        self.usage_count = Some(count.into());
        self
    }
}

impl From<&Medicine> for MedicineDraft {
    fn from(medicine: &Medicine) -> Self {
        Self {
            id: Some(medicine.id.to_string()),
            name: Some(medicine.name.clone()),
            category: Some(medicine.category.clone()),
            mrp: Some(NumberInput::Number(medicine.mrp)),
            quantity: Some(medicine.quantity.into()),
            expiry_date: Some(medicine.expiry_date.clone()),
            purchase_date: Some(medicine.purchase_date.clone()),
            total_price_invested: Some(NumberInput::Number(medicine.total_price_invested)),
            manufacturer: medicine.manufacturer.clone(),
            batch_number: medicine.batch_number.clone(),
            description: medicine.description.clone(),
            usage_count: medicine.usage_count.map(NumberInput::from),
            last_used: medicine.last_used.clone(),
        }
    }
}
