//! Whole-record validation
//!
//! Runs every field validator over a [`MedicineDraft`] and gathers all failures at once,
//! so a form can show every problem in one pass. Financial and identity fields fail
//! loudly; optional metadata degrades by being dropped.

use super::fields::{
    iso_date, parse_date, validate_category, validate_expiry_date, validate_number,
    validate_purchase_date, validate_supplied_id, validate_text, NumberOptions,
};
use crate::domain::errors::VetStockError;
use crate::domain::ids::MedicineId;
use crate::domain::medicine::{Medicine, MedicineDraft};
use crate::domain::Result;
use chrono::NaiveDate;

/// Name given to records submitted without one
pub const DEFAULT_NAME: &str = "Unnamed Medicine";

pub const NAME_LENGTH: usize = 200;
pub const MANUFACTURER_LENGTH: usize = 200;
pub const BATCH_NUMBER_LENGTH: usize = 100;
pub const DESCRIPTION_LENGTH: usize = 1000;

pub const MAX_MRP: f64 = 1_000_000.0;
pub const MAX_QUANTITY: u32 = 1_000_000;
pub const MAX_TOTAL_PRICE: f64 = 100_000_000.0;
pub const MAX_USAGE_COUNT: u32 = 1_000_000;

/// Fields that survived validation
///
/// Required fields are `None` when they failed; `category` always has a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SanitizedFields {
    pub id: Option<MedicineId>,
    pub name: Option<String>,
    pub category: String,
    pub mrp: Option<f64>,
    pub quantity: Option<u32>,
    /// Empty string when the draft carried no expiry
    pub expiry_date: Option<String>,
    pub purchase_date: Option<String>,
    pub total_price_invested: Option<f64>,
    pub manufacturer: Option<String>,
    pub batch_number: Option<String>,
    pub description: Option<String>,
    pub usage_count: Option<u32>,
    pub last_used: Option<String>,
}

/// Result of validating a draft
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValidation {
    /// Every failure, prefixed with the field it concerns
    pub errors: Vec<String>,
    pub sanitized: SanitizedFields,
}

impl RecordValidation {
    /// True when no field failed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts a passing validation into a record
    ///
    /// # Errors
    ///
    /// Returns [`VetStockError::Validation`] with the full error list if any field failed.
    pub fn into_medicine(self) -> Result<Medicine> {
        if !self.errors.is_empty() {
            return Err(VetStockError::Validation(self.errors));
        }

        let s = self.sanitized;
        Ok(Medicine {
            id: required(s.id, "id")?,
            name: required(s.name, "name")?,
            category: s.category,
            mrp: required(s.mrp, "mrp")?,
            quantity: required(s.quantity, "quantity")?,
            expiry_date: required(s.expiry_date, "expiryDate")?,
            purchase_date: required(s.purchase_date, "purchaseDate")?,
            total_price_invested: required(s.total_price_invested, "totalPriceInvested")?,
            manufacturer: s.manufacturer,
            batch_number: s.batch_number,
            description: s.description,
            usage_count: s.usage_count,
            last_used: s.last_used,
        })
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| VetStockError::Unknown(format!("sanitized record is missing {field}")))
}

/// Validates a draft against the allowed categories, relative to `today`
///
/// Never short-circuits. A missing id is generated; a supplied one is capped at 100
/// characters and must then be well-formed.
///
/// # Examples
///
/// ```
/// use vetstock::core::validation::validate_medicine;
/// use vetstock::domain::{MedicineDraft, VETERINARY_MEDICINE_CATEGORIES};
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
/// let draft = MedicineDraft::new()
///     .name("Meloxicam")
///     .category("InvalidCat")
///     .mrp(4.5)
///     .quantity(2u32)
///     .total_price_invested(9.0);
///
/// let result = validate_medicine(&draft, VETERINARY_MEDICINE_CATEGORIES, today);
/// assert!(result.is_valid());
/// assert_eq!(result.sanitized.category, "Other");
/// ```
pub fn validate_medicine(
    draft: &MedicineDraft,
    allowed_categories: &[&str],
    today: NaiveDate,
) -> RecordValidation {
    let mut errors = Vec::new();
    let mut sanitized = SanitizedFields {
        category: validate_category(draft.category.as_deref(), allowed_categories),
        ..SanitizedFields::default()
    };

    match validate_text(draft.name.as_deref(), NAME_LENGTH) {
        Ok(name) if name.is_empty() => sanitized.name = Some(DEFAULT_NAME.to_string()),
        Ok(name) => sanitized.name = Some(name),
        Err(e) => errors.push(format!("Name: {e}")),
    }

    match validate_number(draft.mrp.as_ref(), NumberOptions::bounded(MAX_MRP, 2)) {
        Ok(mrp) => sanitized.mrp = Some(mrp),
        Err(e) => errors.push(format!("MRP: {e}")),
    }

    match validate_number(
        draft.quantity.as_ref(),
        NumberOptions::bounded(f64::from(MAX_QUANTITY), 0),
    ) {
        Ok(quantity) => sanitized.quantity = Some(quantity.floor() as u32),
        Err(e) => errors.push(format!("Quantity: {e}")),
    }

    match validate_number(
        draft.total_price_invested.as_ref(),
        NumberOptions::bounded(MAX_TOTAL_PRICE, 2),
    ) {
        Ok(total) => sanitized.total_price_invested = Some(total),
        Err(e) => errors.push(format!("Total Price: {e}")),
    }

    match validate_expiry_date(draft.expiry_date.as_deref(), today) {
        Ok(expiry) => sanitized.expiry_date = Some(expiry.map(iso_date).unwrap_or_default()),
        Err(e) => errors.push(format!("Expiry Date: {e}")),
    }

    match validate_purchase_date(draft.purchase_date.as_deref(), today) {
        Ok(purchase) => sanitized.purchase_date = Some(iso_date(purchase)),
        Err(e) => errors.push(format!("Purchase Date: {e}")),
    }

    sanitized.manufacturer = optional_text(draft.manufacturer.as_deref(), MANUFACTURER_LENGTH);
    sanitized.batch_number = optional_text(draft.batch_number.as_deref(), BATCH_NUMBER_LENGTH);
    sanitized.description = optional_text(draft.description.as_deref(), DESCRIPTION_LENGTH);

    match draft.id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => match validate_supplied_id(id) {
            Ok(id) => sanitized.id = Some(id),
            Err(e) => errors.push(format!("ID: {e}")),
        },
        None => sanitized.id = Some(MedicineId::generate()),
    }

    if let Some(count) = draft.usage_count.as_ref() {
        sanitized.usage_count = validate_number(
            Some(count),
            NumberOptions::bounded(f64::from(MAX_USAGE_COUNT), 0),
        )
        .ok()
        .map(|c| c.floor() as u32);
    }

    sanitized.last_used = draft
        .last_used
        .as_deref()
        .and_then(parse_date)
        .map(iso_date);

    RecordValidation { errors, sanitized }
}

// Optional metadata: failures and empty results are omitted rather than reported.
fn optional_text(input: Option<&str>, max_length: usize) -> Option<String> {
    input
        .filter(|s| !s.is_empty())
        .and_then(|raw| validate_text(Some(raw), max_length).ok())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::VETERINARY_MEDICINE_CATEGORIES;
    use crate::domain::ids::check_id_format;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn valid_draft() -> MedicineDraft {
        MedicineDraft::new()
            .name("Amoxicillin 250mg")
            .category("Antibiotics")
            .mrp("12.50")
            .quantity(10u32)
            .total_price_invested(125.0)
            .expiry_date("2027-03-31")
            .purchase_date("2026-05-01")
            .batch_number("AMX-001")
    }

    fn validate(draft: &MedicineDraft) -> RecordValidation {
        validate_medicine(draft, VETERINARY_MEDICINE_CATEGORIES, today())
    }

    #[test]
    fn test_valid_draft_produces_medicine() {
        let medicine = validate(&valid_draft()).into_medicine().unwrap();
        assert_eq!(medicine.name, "Amoxicillin 250mg");
        assert_eq!(medicine.category, "Antibiotics");
        assert_eq!(medicine.mrp, 12.5);
        assert_eq!(medicine.quantity, 10);
        assert_eq!(medicine.total_price_invested, 125.0);
        assert_eq!(medicine.expiry_date, "2027-03-31");
        assert_eq!(medicine.purchase_date, "2026-05-01");
        assert_eq!(medicine.batch_number.as_deref(), Some("AMX-001"));
        assert!(check_id_format(medicine.id.as_str()).is_ok());
    }

    #[test]
    fn test_all_errors_are_collected() {
        let draft = valid_draft()
            .mrp("abc")
            .quantity(-1.0)
            .total_price_invested(200_000_000.0)
            .expiry_date("2099-01-01")
            .purchase_date("yesterday-ish");

        let result = validate(&draft);
        assert!(!result.is_valid());
        assert_eq!(
            result.errors,
            vec![
                "MRP: Invalid number format".to_string(),
                "Quantity: Value cannot be negative".to_string(),
                "Total Price: Value must be less than 100,000,000".to_string(),
                "Expiry Date: Expiry date cannot be more than 10 years in the future".to_string(),
                "Purchase Date: Invalid purchase date format".to_string(),
            ]
        );
        // Fields that passed are still sanitized
        assert_eq!(result.sanitized.name.as_deref(), Some("Amoxicillin 250mg"));
        assert!(result.sanitized.mrp.is_none());

        let err = result.into_medicine().unwrap_err();
        assert_eq!(err.validation_errors().len(), 5);
    }

    #[test]
    fn test_invalid_category_is_coerced_not_rejected() {
        let result = validate(&valid_draft().category("InvalidCat"));
        assert!(result.is_valid());
        assert_eq!(result.sanitized.category, "Other");
    }

    #[test]
    fn test_defaults_for_empty_draft() {
        let result = validate(&MedicineDraft::new());
        assert!(result.is_valid());

        let medicine = result.into_medicine().unwrap();
        assert_eq!(medicine.name, DEFAULT_NAME);
        assert_eq!(medicine.category, "Other");
        assert_eq!(medicine.mrp, 0.0);
        assert_eq!(medicine.quantity, 0);
        assert_eq!(medicine.expiry_date, "");
        assert_eq!(medicine.purchase_date, "2026-06-15");
        assert!(medicine.usage_count.is_none());
    }

    #[test]
    fn test_name_is_sanitized() {
        let result = validate(&valid_draft().name("<img src=x onerror=alert(1)>Carprofen"));
        assert_eq!(result.sanitized.name.as_deref(), Some("Carprofen"));

        let long = "n".repeat(250);
        let result = validate(&valid_draft().name(long));
        assert_eq!(result.sanitized.name.map(|n| n.len()), Some(NAME_LENGTH));
    }

    #[test]
    fn test_optional_text_degrades_silently() {
        let draft = valid_draft()
            .manufacturer("<b></b>")
            .batch_number("B".repeat(150))
            .description("  Give with food  ");

        let result = validate(&draft);
        assert!(result.is_valid());
        assert_eq!(result.sanitized.manufacturer, None);
        assert_eq!(
            result.sanitized.batch_number.map(|b| b.len()),
            Some(BATCH_NUMBER_LENGTH)
        );
        assert_eq!(
            result.sanitized.description.as_deref(),
            Some("Give with food")
        );
    }

    #[test]
    fn test_supplied_id_is_checked() {
        let result = validate(&valid_draft().id("keep-me_1"));
        assert_eq!(
            result.sanitized.id.as_ref().map(MedicineId::as_str),
            Some("keep-me_1")
        );

        let result = validate(&valid_draft().id("bad id!"));
        assert_eq!(result.errors, vec!["ID: Invalid ID format".to_string()]);

        let result = validate(&valid_draft().id("k".repeat(140)));
        assert!(result.is_valid());
        assert_eq!(result.sanitized.id.map(|id| id.as_str().len()), Some(100));
    }

    #[test]
    fn test_empty_id_is_generated() {
        let result = validate(&valid_draft().id(""));
        assert!(result.is_valid());
        assert!(result.sanitized.id.is_some());
    }

    #[test]
    fn test_usage_count_only_when_provided() {
        let result = validate(&valid_draft());
        assert_eq!(result.sanitized.usage_count, None);

        let result = validate(&valid_draft().usage_count("7"));
        assert_eq!(result.sanitized.usage_count, Some(7));

        let result = validate(&valid_draft().usage_count(2_000_000u32));
        assert!(result.is_valid());
        assert_eq!(result.sanitized.usage_count, None);
    }

    #[test]
    fn test_quantity_is_integral() {
        let result = validate(&valid_draft().quantity("3.4"));
        assert_eq!(result.sanitized.quantity, Some(3));
    }

    #[test]
    fn test_last_used_kept_only_when_parseable() {
        let mut draft = valid_draft();
        draft.last_used = Some("2026-06-01T10:00:00Z".to_string());
        assert_eq!(
            validate(&draft).sanitized.last_used.as_deref(),
            Some("2026-06-01")
        );

        draft.last_used = Some("sometime".to_string());
        assert_eq!(validate(&draft).sanitized.last_used, None);
    }
}
