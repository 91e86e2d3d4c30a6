//! Collection-level checks: duplicate stock items and logical inconsistencies

use crate::core::validation::fields::parse_date;
use crate::domain::ids::MedicineId;
use crate::domain::medicine::{DuplicateKey, Medicine};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Largest tolerated gap between `totalPriceInvested` and `mrp × quantity`
pub const PRICE_TOLERANCE: f64 = 0.01;

/// Groups records sharing a duplicate key, in first-seen order
///
/// Only groups with more than one member are returned.
pub fn find_duplicates(medicines: &[Medicine]) -> Vec<Vec<&Medicine>> {
    let mut groups: Vec<Vec<&Medicine>> = Vec::new();
    let mut index: HashMap<DuplicateKey, usize> = HashMap::new();

    for medicine in medicines {
        match index.get(&medicine.duplicate_key()) {
            Some(&slot) => groups[slot].push(medicine),
            None => {
                index.insert(medicine.duplicate_key(), groups.len());
                groups.push(vec![medicine]);
            }
        }
    }

    groups.retain(|group| group.len() > 1);
    groups
}

/// A single problem found by [`check_data_consistency`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsistencyIssue {
    DuplicateId { id: MedicineId },
    PriceMismatch { name: String, expected: f64, actual: f64 },
    PurchaseAfterExpiry { name: String },
}

impl fmt::Display for ConsistencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyIssue::DuplicateId { id } => write!(f, "Duplicate ID found: {id}"),
            ConsistencyIssue::PriceMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "Price mismatch for {name}: expected {expected:.2}, got {actual:.2}"
            ),
            ConsistencyIssue::PurchaseAfterExpiry { name } => {
                write!(f, "Purchase date after expiry date for {name}")
            }
        }
    }
}

/// Outcome of a consistency check
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsistencyReport {
    pub issues: Vec<ConsistencyIssue>,
}

impl ConsistencyReport {
    /// True when no issue was found
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issue descriptions in detection order
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    /// Whether any duplicate ids were found
    pub fn has_duplicate_ids(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, ConsistencyIssue::DuplicateId { .. }))
    }

    /// Format the report as a human-readable string
    pub fn format_summary(&self) -> String {
        if self.issues.is_empty() {
            return "✅ No consistency issues found\n".to_string();
        }

        let mut summary = format!("⚠️  {} consistency issue(s):\n", self.issues.len());
        for (i, issue) in self.issues.iter().enumerate() {
            summary.push_str(&format!("  {}. {}\n", i + 1, issue));
        }
        summary
    }
}

/// Scans a collection for repeated ids, price mismatches, and inverted dates
///
/// Duplicate-id issues come first, then per-record issues in collection order. Nothing
/// here is fatal; callers decide whether to repair.
///
/// # Examples
///
/// ```
/// use vetstock::core::integrity::check_data_consistency;
/// use vetstock::domain::{Medicine, MedicineId};
///
/// let medicine = Medicine {
///     id: MedicineId::new("m1").unwrap(),
///     name: "X".to_string(),
///     category: "Other".to_string(),
///     mrp: 10.0,
///     quantity: 5,
///     expiry_date: String::new(),
///     purchase_date: "2026-01-01".to_string(),
///     total_price_invested: 60.0,
///     manufacturer: None,
///     batch_number: None,
///     description: None,
///     usage_count: None,
///     last_used: None,
/// };
///
/// let report = check_data_consistency(&[medicine]);
/// assert_eq!(report.messages(), vec!["Price mismatch for X: expected 50.00, got 60.00"]);
/// ```
pub fn check_data_consistency(medicines: &[Medicine]) -> ConsistencyReport {
    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    for medicine in medicines {
        if !seen.insert(&medicine.id) {
            issues.push(ConsistencyIssue::DuplicateId {
                id: medicine.id.clone(),
            });
        }
    }

    for medicine in medicines {
        if let Some(issue) = price_mismatch(medicine) {
            issues.push(issue);
        }

        if purchased_after_expiry(medicine) {
            issues.push(ConsistencyIssue::PurchaseAfterExpiry {
                name: medicine.name.clone(),
            });
        }
    }

    ConsistencyReport { issues }
}

/// Reports a price mismatch when the invested total drifts from `mrp × quantity`
pub fn price_mismatch(medicine: &Medicine) -> Option<ConsistencyIssue> {
    let expected = medicine.mrp * f64::from(medicine.quantity);
    let difference = (medicine.total_price_invested - expected).abs();

    (difference > PRICE_TOLERANCE).then(|| ConsistencyIssue::PriceMismatch {
        name: medicine.name.clone(),
        expected,
        actual: medicine.total_price_invested,
    })
}

fn purchased_after_expiry(medicine: &Medicine) -> bool {
    if medicine.purchase_date.is_empty() || medicine.expiry_date.is_empty() {
        return false;
    }
    match (
        parse_date(&medicine.purchase_date),
        parse_date(&medicine.expiry_date),
    ) {
        (Some(purchase), Some(expiry)) => purchase > expiry,
        _ => false,
    }
}
