//! Medicine name suggestions
//!
//! Ranks names from the static catalog against a partial query so a form can offer
//! completions while the user types.

use crate::domain::catalog::{POPULAR_MEDICINES, VETERINARY_MEDICINES};
use std::collections::HashSet;

/// Default number of suggestions returned
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Suggests catalog names for `query`, best matches first
///
/// Ranking tiers, case-insensitive: exact match, then prefix, then substring, then a
/// prefix of any word (words split on spaces and hyphens). Each name appears at most
/// once. A blank query returns the first `limit` catalog names.
///
/// # Examples
///
/// ```
/// use vetstock::core::search::suggest_medicine_names;
///
/// let names = suggest_medicine_names("cipro", 10);
/// assert_eq!(names, vec!["Ciprofloxacin", "Ciprofloxacin Eye Drops"]);
///
/// let names = suggest_medicine_names("drops", 10);
/// assert!(names.contains(&"Gentamicin Eye Drops"));
/// ```
pub fn suggest_medicine_names(query: &str, limit: usize) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    let candidates = unique_names();

    if needle.is_empty() {
        return candidates.into_iter().take(limit).collect();
    }

    let mut tiers: [Vec<&'static str>; 4] = Default::default();
    for name in candidates {
        let lower = name.to_lowercase();
        let tier = if lower == needle {
            0
        } else if lower.starts_with(&needle) {
            1
        } else if lower.contains(&needle) {
            2
        } else if lower
            .split(|c: char| c.is_whitespace() || c == '-')
            .any(|word| word.starts_with(&needle))
        {
            3
        } else {
            continue;
        };
        tiers[tier].push(name);
    }

    tiers.into_iter().flatten().take(limit).collect()
}

/// Frequently dispensed medicines, for showing before anything is typed
pub fn popular_medicines(limit: usize) -> Vec<&'static str> {
    POPULAR_MEDICINES.iter().copied().take(limit).collect()
}

fn unique_names() -> Vec<&'static str> {
    let mut seen = HashSet::new();
    VETERINARY_MEDICINES
        .iter()
        .copied()
        .filter(|name| seen.insert(*name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_returns_catalog_prefix() {
        assert_eq!(
            suggest_medicine_names("", 3),
            vec!["Amoxicillin", "Amoxicillin-Clavulanate", "Cephalexin"]
        );
        assert_eq!(suggest_medicine_names("   ", 1), vec!["Amoxicillin"]);
    }

    #[test]
    fn test_exact_before_prefix() {
        let names = suggest_medicine_names("AMOXICILLIN", 10);
        assert_eq!(names, vec!["Amoxicillin", "Amoxicillin-Clavulanate"]);
    }

    #[test]
    fn test_prefix_before_substring() {
        let names = suggest_medicine_names("cipro", 10);
        assert_eq!(
            names,
            vec!["Ciprofloxacin", "Ciprofloxacin Eye Drops"]
        );

        let names = suggest_medicine_names("floxacin", 10);
        assert_eq!(
            names,
            vec!["Enrofloxacin", "Ciprofloxacin", "Ciprofloxacin Eye Drops"]
        );
    }

    #[test]
    fn test_results_are_unique() {
        let names = suggest_medicine_names("metronidazole", 10);
        assert_eq!(names, vec!["Metronidazole"]);

        let names = suggest_medicine_names("prednisolone", 10);
        assert_eq!(names, vec!["Prednisolone"]);
    }

    #[test]
    fn test_limit_is_respected() {
        assert_eq!(suggest_medicine_names("a", 4).len(), 4);
        assert!(suggest_medicine_names("a", 0).is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(suggest_medicine_names("zzzz", 10).is_empty());
    }

    #[test]
    fn test_popular_medicines() {
        assert_eq!(popular_medicines(2), vec!["Amoxicillin", "Carprofen"]);
        assert_eq!(popular_medicines(100).len(), POPULAR_MEDICINES.len());
    }
}
