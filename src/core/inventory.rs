//! Read-only inventory queries and the summary report

use crate::config::schema::InventoryConfig;
use crate::domain::medicine::Medicine;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Days covered by the "recent additions" window
pub const RECENT_WINDOW_DAYS: i64 = 15;

/// How close a medicine is to its expiry date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "days", rename_all = "lowercase")]
pub enum ExpiryStatus {
    /// No expiry date recorded
    Unknown,
    /// Expiry date is today or earlier
    Expired,
    /// Within the critical window
    Expiring(i64),
    /// Within the warning window
    Warning(i64),
    Valid(i64),
}

impl ExpiryStatus {
    /// Classifies an expiry date relative to `today`
    ///
    /// # Examples
    ///
    /// ```
    /// use vetstock::core::inventory::ExpiryStatus;
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
    /// let soon = NaiveDate::from_ymd_opt(2026, 6, 25);
    /// assert_eq!(ExpiryStatus::for_date(soon, today, 30, 15), ExpiryStatus::Expiring(10));
    /// assert_eq!(ExpiryStatus::for_date(Some(today), today, 30, 15), ExpiryStatus::Expired);
    /// assert_eq!(ExpiryStatus::for_date(None, today, 30, 15), ExpiryStatus::Unknown);
    /// ```
    pub fn for_date(
        expiry: Option<NaiveDate>,
        today: NaiveDate,
        warning_days: i64,
        critical_days: i64,
    ) -> Self {
        let Some(expiry) = expiry else {
            return ExpiryStatus::Unknown;
        };

        let days = (expiry - today).num_days();
        if days <= 0 {
            ExpiryStatus::Expired
        } else if days <= critical_days {
            ExpiryStatus::Expiring(days)
        } else if days <= warning_days {
            ExpiryStatus::Warning(days)
        } else {
            ExpiryStatus::Valid(days)
        }
    }

    /// Classifies a record using the configured thresholds
    pub fn for_medicine(medicine: &Medicine, today: NaiveDate, config: &InventoryConfig) -> Self {
        Self::for_date(
            medicine.expiry(),
            today,
            config.expiry_warning_days,
            config.expiry_critical_days,
        )
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryStatus::Unknown => write!(f, "No expiry date"),
            ExpiryStatus::Expired => write!(f, "Expired"),
            ExpiryStatus::Expiring(days) | ExpiryStatus::Warning(days) | ExpiryStatus::Valid(days) => {
                write!(f, "Expires in {days} days")
            }
        }
    }
}

/// Records ordered by quantity, lowest first; ties keep collection order
pub fn sort_by_quantity(medicines: &[Medicine]) -> Vec<&Medicine> {
    let mut sorted: Vec<&Medicine> = medicines.iter().collect();
    sorted.sort_by_key(|m| m.quantity);
    sorted
}

/// Records that have been used at least once, most used first
pub fn most_used(medicines: &[Medicine], limit: usize) -> Vec<&Medicine> {
    let mut used: Vec<&Medicine> = medicines.iter().filter(|m| m.usage() > 0).collect();
    used.sort_by(|a, b| b.usage().cmp(&a.usage()));
    used.truncate(limit);
    used
}

/// Case-insensitive match on name, category, manufacturer, or batch number
///
/// A blank query matches everything.
pub fn search<'a>(medicines: &'a [Medicine], query: &str) -> Vec<&'a Medicine> {
    if query.trim().is_empty() {
        return medicines.iter().collect();
    }

    let needle = query.to_lowercase();
    let matches = |field: &str| field.to_lowercase().contains(&needle);
    medicines
        .iter()
        .filter(|m| {
            matches(&m.name)
                || matches(&m.category)
                || m.manufacturer.as_deref().is_some_and(matches)
                || m.batch_number.as_deref().is_some_and(matches)
        })
        .collect()
}

/// Records in exactly `category`; an empty category matches everything
pub fn filter_by_category<'a>(medicines: &'a [Medicine], category: &str) -> Vec<&'a Medicine> {
    medicines
        .iter()
        .filter(|m| category.is_empty() || m.category == category)
        .collect()
}

/// Sum of `totalPriceInvested` across the collection
pub fn total_inventory_value(medicines: &[Medicine]) -> f64 {
    medicines.iter().map(|m| m.total_price_invested).sum()
}

/// Records at or below `threshold` units
pub fn low_stock(medicines: &[Medicine], threshold: u32) -> Vec<&Medicine> {
    medicines.iter().filter(|m| m.quantity <= threshold).collect()
}

/// Dashboard figures for the whole inventory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySummary {
    pub total_medicines: usize,
    pub total_quantity: u64,
    pub total_investment: f64,
    pub expired: usize,
    pub expiring_soon: usize,
    pub low_stock: usize,
    /// Purchases in the last [`RECENT_WINDOW_DAYS`] days
    pub recent_additions: usize,
    pub recent_investment: f64,
    /// Purchases in the current calendar month
    pub monthly_additions: usize,
    pub monthly_investment: f64,
    pub by_category: BTreeMap<String, usize>,
}

impl InventorySummary {
    /// Computes the summary as of `today`
    pub fn compute(medicines: &[Medicine], today: NaiveDate, config: &InventoryConfig) -> Self {
        let recent_start = today - Duration::days(RECENT_WINDOW_DAYS);
        let is_recent = |m: &&Medicine| m.purchase().is_some_and(|d| d >= recent_start);
        let is_this_month = |m: &&Medicine| {
            m.purchase()
                .is_some_and(|d| d.year() == today.year() && d.month() == today.month())
        };

        let recent: Vec<&Medicine> = medicines.iter().filter(is_recent).collect();
        let monthly: Vec<&Medicine> = medicines.iter().filter(is_this_month).collect();

        let mut by_category = BTreeMap::new();
        for medicine in medicines {
            *by_category.entry(medicine.category.clone()).or_insert(0) += 1;
        }

        let statuses: Vec<ExpiryStatus> = medicines
            .iter()
            .map(|m| ExpiryStatus::for_medicine(m, today, config))
            .collect();

        Self {
            total_medicines: medicines.len(),
            total_quantity: medicines.iter().map(|m| u64::from(m.quantity)).sum(),
            total_investment: total_inventory_value(medicines),
            expired: statuses
                .iter()
                .filter(|s| matches!(s, ExpiryStatus::Expired))
                .count(),
            expiring_soon: statuses
                .iter()
                .filter(|s| matches!(s, ExpiryStatus::Expiring(_)))
                .count(),
            low_stock: low_stock(medicines, config.low_stock_threshold).len(),
            recent_additions: recent.len(),
            recent_investment: recent.iter().map(|m| m.total_price_invested).sum(),
            monthly_additions: monthly.len(),
            monthly_investment: monthly.iter().map(|m| m.total_price_invested).sum(),
            by_category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::MedicineId;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn medicine(id: &str, name: &str, quantity: u32) -> Medicine {
        Medicine {
            id: MedicineId::new(id).unwrap(),
            name: name.to_string(),
            category: "Other".to_string(),
            mrp: 1.0,
            quantity,
            expiry_date: String::new(),
            purchase_date: "2026-01-01".to_string(),
            total_price_invested: f64::from(quantity),
            manufacturer: None,
            batch_number: None,
            description: None,
            usage_count: None,
            last_used: None,
        }
    }

    fn ids(medicines: &[&Medicine]) -> Vec<String> {
        medicines.iter().map(|m| m.id.to_string()).collect()
    }

    #[test]
    fn test_expiry_thresholds() {
        let at = |days: i64| Some(today() + Duration::days(days));
        assert_eq!(ExpiryStatus::for_date(at(-3), today(), 30, 15), ExpiryStatus::Expired);
        assert_eq!(ExpiryStatus::for_date(at(0), today(), 30, 15), ExpiryStatus::Expired);
        assert_eq!(ExpiryStatus::for_date(at(15), today(), 30, 15), ExpiryStatus::Expiring(15));
        assert_eq!(ExpiryStatus::for_date(at(16), today(), 30, 15), ExpiryStatus::Warning(16));
        assert_eq!(ExpiryStatus::for_date(at(30), today(), 30, 15), ExpiryStatus::Warning(30));
        assert_eq!(ExpiryStatus::for_date(at(31), today(), 30, 15), ExpiryStatus::Valid(31));
        assert_eq!(ExpiryStatus::Valid(31).to_string(), "Expires in 31 days");
    }

    #[test]
    fn test_sort_by_quantity() {
        let collection = [medicine("a", "A", 5), medicine("b", "B", 1), medicine("c", "C", 5)];
        assert_eq!(ids(&sort_by_quantity(&collection)), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_most_used_skips_unused() {
        let mut a = medicine("a", "A", 1);
        a.usage_count = Some(2);
        let mut b = medicine("b", "B", 1);
        b.usage_count = Some(7);
        let mut c = medicine("c", "C", 1);
        c.usage_count = Some(0);
        let d = medicine("d", "D", 1);

        let collection = [a, b, c, d];
        assert_eq!(ids(&most_used(&collection, 10)), vec!["b", "a"]);
        assert_eq!(ids(&most_used(&collection, 1)), vec!["b"]);
    }

    #[test]
    fn test_search_fields() {
        let mut a = medicine("a", "Carprofen", 1);
        a.manufacturer = Some("Zoetis".to_string());
        let mut b = medicine("b", "Insulin", 1);
        b.batch_number = Some("INS-2026".to_string());
        b.category = "Hormonal".to_string();

        let collection = [a, b];
        assert_eq!(ids(&search(&collection, "zoe")), vec!["a"]);
        assert_eq!(ids(&search(&collection, "ins-")), vec!["b"]);
        assert_eq!(ids(&search(&collection, "HORMON")), vec!["b"]);
        assert_eq!(search(&collection, " ").len(), 2);
    }

    #[test]
    fn test_filter_and_totals() {
        let mut a = medicine("a", "A", 3);
        a.category = "Vaccines".to_string();
        let b = medicine("b", "B", 12);
        let collection = [a, b];

        assert_eq!(ids(&filter_by_category(&collection, "Vaccines")), vec!["a"]);
        assert_eq!(filter_by_category(&collection, "").len(), 2);
        assert_eq!(total_inventory_value(&collection), 15.0);
        assert_eq!(ids(&low_stock(&collection, 10)), vec!["a"]);
    }

    #[test]
    fn test_summary() {
        let mut expired = medicine("a", "A", 2);
        expired.expiry_date = "2026-06-01".to_string();
        let mut expiring = medicine("b", "B", 40);
        expiring.expiry_date = "2026-06-20".to_string();
        expiring.purchase_date = "2026-06-10".to_string();
        expiring.category = "Vaccines".to_string();
        let steady = medicine("c", "C", 20);

        let summary = InventorySummary::compute(
            &[expired, expiring, steady],
            today(),
            &InventoryConfig::default(),
        );

        assert_eq!(summary.total_medicines, 3);
        assert_eq!(summary.total_quantity, 62);
        assert_eq!(summary.total_investment, 62.0);
        assert_eq!(summary.expired, 1);
        assert_eq!(summary.expiring_soon, 1);
        assert_eq!(summary.low_stock, 1);
        assert_eq!(summary.recent_additions, 1);
        assert_eq!(summary.recent_investment, 40.0);
        assert_eq!(summary.monthly_additions, 1);
        assert_eq!(summary.by_category.get("Other"), Some(&2));
        assert_eq!(summary.by_category.get("Vaccines"), Some(&1));
    }
}
