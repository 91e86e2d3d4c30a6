//! Medicine identifier with validation
//!
//! Identifiers are 1–100 characters drawn from `[a-zA-Z0-9_-]`. They are assigned once,
//! either by the caller or by [`MedicineId::generate`], and never change afterwards.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum identifier length in characters
pub const MAX_ID_LENGTH: usize = 100;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const GENERATED_SUFFIX_LEN: usize = 9;

/// Medicine identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use vetstock::domain::ids::MedicineId;
/// use std::str::FromStr;
///
/// let id = MedicineId::from_str("amox-250_batch7").unwrap();
/// assert_eq!(id.as_str(), "amox-250_batch7");
///
/// assert!(MedicineId::new("drop table;").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MedicineId(String);

impl MedicineId {
    /// Creates a new MedicineId, rejecting empty, malformed, or over-long input
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        check_id_format(&id)?;
        Ok(Self(id))
    }

    /// Generates a fresh identifier: millisecond timestamp plus a random base-36 suffix
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..GENERATED_SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!("{}{}", Utc::now().timestamp_millis(), suffix))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Checks identifier rules, reporting the first violation
///
/// The character check runs before the length check so that malformed input is
/// reported as such regardless of its length.
pub fn check_id_format(id: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err("ID is required".to_string());
    }
    if !id.chars().all(is_id_char) {
        return Err("Invalid ID format".to_string());
    }
    if id.chars().count() > MAX_ID_LENGTH {
        return Err("ID is too long".to_string());
    }
    Ok(())
}

/// Whether `c` may appear in an identifier
pub fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

impl fmt::Display for MedicineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MedicineId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MedicineId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MedicineId> for String {
    fn from(id: MedicineId) -> Self {
        id.0
    }
}

impl AsRef<str> for MedicineId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medicine_id_creation() {
        let id = MedicineId::new("1718000000000abc123xyz").unwrap();
        assert_eq!(id.as_str(), "1718000000000abc123xyz");
        assert_eq!(format!("{id}"), "1718000000000abc123xyz");
    }

    #[test]
    fn test_medicine_id_rejects_bad_input() {
        assert_eq!(MedicineId::new("").unwrap_err(), "ID is required");
        assert_eq!(MedicineId::new("has space").unwrap_err(), "Invalid ID format");
        assert_eq!(MedicineId::new("<script>").unwrap_err(), "Invalid ID format");
        assert_eq!(MedicineId::new("a".repeat(101)).unwrap_err(), "ID is too long");
        assert!(MedicineId::new("a".repeat(100)).is_ok());
    }

    #[test]
    fn test_generated_ids_are_valid_and_distinct() {
        let a = MedicineId::generate();
        let b = MedicineId::generate();
        assert!(check_id_format(a.as_str()).is_ok());
        assert!(check_id_format(b.as_str()).is_ok());
        assert_ne!(a, b);
    }

    #[test]
    fn test_medicine_id_serialization() {
        let id = MedicineId::new("med_1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"med_1\"");
        let back: MedicineId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);

        assert!(serde_json::from_str::<MedicineId>("\"bad id\"").is_err());
    }
}
