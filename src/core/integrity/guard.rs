//! Structural guard and repair for records of unknown shape
//!
//! Persisted blobs may have been written by older versions or edited by hand, so they are
//! inspected as [`serde_json::Value`] before being trusted as [`Medicine`].

use crate::core::validation::fields::{iso_date, truncate_chars};
use crate::core::validation::record::{
    BATCH_NUMBER_LENGTH, DEFAULT_NAME, DESCRIPTION_LENGTH, MANUFACTURER_LENGTH, MAX_MRP,
    MAX_QUANTITY, MAX_TOTAL_PRICE, MAX_USAGE_COUNT, NAME_LENGTH,
};
use crate::domain::catalog::{is_known_category, DEFAULT_CATEGORY};
use crate::domain::ids::{check_id_format, is_id_char, MedicineId, MAX_ID_LENGTH};
use crate::domain::medicine::Medicine;
use chrono::NaiveDate;
use serde_json::{Map, Value};

const REQUIRED_STRINGS: &[&str] = &["id", "name", "category", "expiryDate", "purchaseDate"];
const REQUIRED_NUMBERS: &[&str] = &["mrp", "quantity", "totalPriceInvested"];
const OPTIONAL_STRINGS: &[&str] = &["manufacturer", "batchNumber", "description", "lastUsed"];

/// Whether `value` already has the exact shape of a stored medicine
///
/// Checks presence and primitive type of every required field, non-negative numbers,
/// identifier rules, category membership, and the type of any optional field present.
///
/// # Examples
///
/// ```
/// use vetstock::core::integrity::is_valid_medicine;
/// use serde_json::json;
///
/// let record = json!({
///     "id": "m1", "name": "Carprofen", "category": "Other", "mrp": 2.0,
///     "quantity": 3, "totalPriceInvested": 6.0, "expiryDate": "", "purchaseDate": "2026-01-01"
/// });
/// assert!(is_valid_medicine(&record));
/// assert!(!is_valid_medicine(&json!({ "id": "m1" })));
/// ```
pub fn is_valid_medicine(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };

    let strings_ok = REQUIRED_STRINGS
        .iter()
        .all(|key| object.get(*key).is_some_and(Value::is_string));
    if !strings_ok {
        return false;
    }

    let numbers_ok = REQUIRED_NUMBERS
        .iter()
        .all(|key| object.get(*key).and_then(Value::as_f64).is_some_and(non_negative));
    if !numbers_ok {
        return false;
    }

    let id = object.get("id").and_then(Value::as_str).unwrap_or_default();
    if check_id_format(id).is_err() {
        return false;
    }

    let category = object.get("category").and_then(Value::as_str).unwrap_or_default();
    if !is_known_category(category) {
        return false;
    }

    let optional_strings_ok = OPTIONAL_STRINGS
        .iter()
        .all(|key| object.get(*key).map_or(true, Value::is_string));
    if !optional_strings_ok {
        return false;
    }

    object
        .get("usageCount")
        .map_or(true, |count| count.as_f64().is_some_and(non_negative))
}

fn non_negative(n: f64) -> bool {
    n.is_finite() && n >= 0.0
}

/// Coerces any JSON object into a well-formed medicine
///
/// Returns `None` only for non-objects. Every field is pulled into range rather than
/// rejected, and applying the repair to its own output changes nothing.
///
/// # Examples
///
/// ```
/// use vetstock::core::integrity::sanitize_medicine;
/// use chrono::NaiveDate;
/// use serde_json::json;
///
/// let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
/// let repaired = sanitize_medicine(&json!({ "id": "a b!c", "quantity": "7.9" }), today).unwrap();
/// assert_eq!(repaired.id.as_str(), "abc");
/// assert_eq!(repaired.quantity, 7);
/// assert_eq!(repaired.name, "Unnamed Medicine");
///
/// assert!(sanitize_medicine(&json!([1, 2]), today).is_none());
/// ```
pub fn sanitize_medicine(value: &Value, today: NaiveDate) -> Option<Medicine> {
    let object = value.as_object()?;

    let name = text(object, "name")
        .map(|name| truncate_chars(&name, NAME_LENGTH))
        .unwrap_or_else(|| DEFAULT_NAME.to_string());

    let category = object
        .get("category")
        .and_then(Value::as_str)
        .filter(|category| is_known_category(category))
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();

    Some(Medicine {
        id: repair_id(object),
        name,
        category,
        mrp: clamp(number(object, "mrp"), MAX_MRP),
        quantity: clamp(number(object, "quantity").floor(), f64::from(MAX_QUANTITY)) as u32,
        expiry_date: object
            .get("expiryDate")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        purchase_date: object
            .get("purchaseDate")
            .and_then(Value::as_str)
            .filter(|date| !date.is_empty())
            .map_or_else(|| iso_date(today), str::to_string),
        total_price_invested: clamp(number(object, "totalPriceInvested"), MAX_TOTAL_PRICE),
        manufacturer: text(object, "manufacturer").map(|s| truncate_chars(&s, MANUFACTURER_LENGTH)),
        batch_number: text(object, "batchNumber").map(|s| truncate_chars(&s, BATCH_NUMBER_LENGTH)),
        description: text(object, "description").map(|s| truncate_chars(&s, DESCRIPTION_LENGTH)),
        usage_count: object
            .get("usageCount")
            .filter(|count| !count.is_null())
            .map(|count| clamp(coerce_number(count).floor(), f64::from(MAX_USAGE_COUNT)) as u32),
        last_used: text(object, "lastUsed"),
    })
}

fn repair_id(object: &Map<String, Value>) -> MedicineId {
    let cleaned: String = text(object, "id")
        .unwrap_or_default()
        .chars()
        .filter(|c| is_id_char(*c))
        .take(MAX_ID_LENGTH)
        .collect();

    if cleaned.is_empty() {
        return MedicineId::generate();
    }
    MedicineId::new(cleaned).unwrap_or_else(|_| MedicineId::generate())
}

// Stringified field; `None` when absent, null, empty, or not a scalar.
fn text(object: &Map<String, Value>, key: &str) -> Option<String> {
    let rendered = match object.get(key)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    Some(rendered).filter(|s| !s.is_empty())
}

fn number(object: &Map<String, Value>, key: &str) -> f64 {
    object.get(key).map_or(0.0, coerce_number)
}

// Numeric strings must be numeric in full; anything unreadable counts as zero.
fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

fn clamp(value: f64, max: f64) -> f64 {
    value.max(0.0).min(max)
}

/// Turns a parsed blob into a collection, keeping what can be kept
///
/// Elements that pass [`is_valid_medicine`] are taken as they are; the rest are repaired,
/// and anything that cannot be repaired is skipped. Non-array input yields an empty
/// collection.
pub fn validate_medicines_array(value: &Value, today: NaiveDate) -> Vec<Medicine> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            if is_valid_medicine(item) {
                // Shape-valid values can still miss the typed model (fractional quantity)
                if let Ok(medicine) = serde_json::from_value::<Medicine>(item.clone()) {
                    return Some(medicine);
                }
            }
            sanitize_medicine(item, today)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn well_formed() -> Value {
        json!({
            "id": "m-1",
            "name": "Meloxicam",
            "category": "Pain Relief & Anti-inflammatory",
            "mrp": 4.5,
            "quantity": 2,
            "totalPriceInvested": 9.0,
            "expiryDate": "2027-01-01",
            "purchaseDate": "2026-01-01"
        })
    }

    fn with(key: &str, value: Value) -> Value {
        let mut record = well_formed();
        record[key] = value;
        record
    }

    #[test]
    fn test_guard_accepts_well_formed_record() {
        assert!(is_valid_medicine(&well_formed()));
        assert!(is_valid_medicine(&with("usageCount", json!(3))));
        assert!(is_valid_medicine(&with("batchNumber", json!("B1"))));
    }

    #[test]
    fn test_guard_rejects_bad_shapes() {
        assert!(!is_valid_medicine(&json!(null)));
        assert!(!is_valid_medicine(&json!("medicine")));
        assert!(!is_valid_medicine(&with("mrp", json!("4.5"))));
        assert!(!is_valid_medicine(&with("quantity", json!(-1))));
        assert!(!is_valid_medicine(&with("id", json!("has space"))));
        assert!(!is_valid_medicine(&with("id", json!("x".repeat(101)))));
        assert!(!is_valid_medicine(&with("category", json!("Snacks"))));
        assert!(!is_valid_medicine(&with("manufacturer", json!(12))));
        assert!(!is_valid_medicine(&with("usageCount", json!(-2))));
        assert!(!is_valid_medicine(&with("expiryDate", json!(null))));
    }

    #[test]
    fn test_guard_does_not_mutate() {
        let record = with("category", json!("Snacks"));
        let before = record.clone();
        is_valid_medicine(&record);
        assert_eq!(record, before);
    }

    #[test]
    fn test_repair_rejects_non_objects() {
        assert!(sanitize_medicine(&json!(null), today()).is_none());
        assert!(sanitize_medicine(&json!(42), today()).is_none());
        assert!(sanitize_medicine(&json!(["a"]), today()).is_none());
    }

    #[test]
    fn test_repair_fills_defaults() {
        let repaired = sanitize_medicine(&json!({}), today()).unwrap();
        assert!(check_id_format(repaired.id.as_str()).is_ok());
        assert_eq!(repaired.name, DEFAULT_NAME);
        assert_eq!(repaired.category, DEFAULT_CATEGORY);
        assert_eq!(repaired.mrp, 0.0);
        assert_eq!(repaired.quantity, 0);
        assert_eq!(repaired.expiry_date, "");
        assert_eq!(repaired.purchase_date, "2026-06-15");
        assert_eq!(repaired.usage_count, None);
    }

    #[test]
    fn test_repair_clamps_numbers() {
        let repaired = sanitize_medicine(
            &json!({
                "id": 17,
                "mrp": 5_000_000,
                "quantity": -4,
                "totalPriceInvested": "abc",
                "usageCount": 3.7
            }),
            today(),
        )
        .unwrap();

        assert_eq!(repaired.id.as_str(), "17");
        assert_eq!(repaired.mrp, MAX_MRP);
        assert_eq!(repaired.quantity, 0);
        assert_eq!(repaired.total_price_invested, 0.0);
        assert_eq!(repaired.usage_count, Some(3));
    }

    #[test]
    fn test_repair_caps_text() {
        let repaired = sanitize_medicine(
            &json!({
                "name": "n".repeat(300),
                "batchNumber": "b".repeat(300),
                "description": "",
                "id": "i".repeat(150)
            }),
            today(),
        )
        .unwrap();

        assert_eq!(repaired.name.len(), NAME_LENGTH);
        assert_eq!(repaired.batch_number.map(|b| b.len()), Some(BATCH_NUMBER_LENGTH));
        assert_eq!(repaired.description, None);
        assert_eq!(repaired.id.as_str().len(), MAX_ID_LENGTH);
    }

    #[test]
    fn test_repair_is_idempotent() {
        let inputs = [
            json!({}),
            json!({ "id": "x y", "name": 5, "category": "Snacks", "quantity": 2.5 }),
            json!({ "mrp": -1, "usageCount": "9", "lastUsed": "2026-01-01" }),
            well_formed(),
        ];

        for input in inputs {
            let once = sanitize_medicine(&input, today()).unwrap();
            let again =
                sanitize_medicine(&serde_json::to_value(&once).unwrap(), today()).unwrap();
            assert_eq!(once, again);
        }
    }

    #[test]
    fn test_array_validation_handles_non_arrays() {
        assert!(validate_medicines_array(&json!({ "a": 1 }), today()).is_empty());
        assert!(validate_medicines_array(&json!("[]"), today()).is_empty());
        assert!(validate_medicines_array(&json!(null), today()).is_empty());
    }

    #[test]
    fn test_array_validation_keeps_repairs_and_skips() {
        let input = json!([
            well_formed(),
            { "name": "Loose record", "quantity": "4" },
            7,
            "text",
            null,
            with("quantity", json!(2.5))
        ]);

        let medicines = validate_medicines_array(&input, today());
        assert_eq!(medicines.len(), 3);
        assert_eq!(medicines[0].id.as_str(), "m-1");
        assert_eq!(medicines[1].name, "Loose record");
        assert_eq!(medicines[1].quantity, 4);
        assert_eq!(medicines[2].id.as_str(), "m-1");
        assert_eq!(medicines[2].quantity, 2);
    }

    #[test]
    fn test_repaired_record_passes_guard() {
        let repaired =
            sanitize_medicine(&json!({ "id": "??", "category": 3, "mrp": "2.5" }), today())
                .unwrap();
        assert!(is_valid_medicine(&serde_json::to_value(&repaired).unwrap()));
    }
}
