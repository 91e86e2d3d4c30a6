//! Static veterinary reference data
//!
//! The category list closes the set of values a record's `category` may hold; the
//! medicine table backs name suggestions.

/// Category assigned when none of the known categories match
pub const DEFAULT_CATEGORY: &str = "Other";

/// Known medicine categories
pub const VETERINARY_MEDICINE_CATEGORIES: &[&str] = &[
    "Other",
    "Antibiotics",
    "Pain Relief & Anti-inflammatory",
    "Vitamins & Supplements",
    "Deworming",
    "Flea & Tick Control",
    "Wound Care",
    "Eye & Ear Care",
    "Respiratory",
    "Digestive",
    "Cardiovascular",
    "Dermatology",
    "Hormonal",
    "Vaccines",
    "Anesthesia",
];

/// Common veterinary medicine names, grouped loosely by category
///
/// Some names appear under more than one group; consumers deduplicate.
pub const VETERINARY_MEDICINES: &[&str] = &[
    // Antibiotics
    "Amoxicillin",
    "Amoxicillin-Clavulanate",
    "Cephalexin",
    "Enrofloxacin",
    "Metronidazole",
    "Doxycycline",
    "Clindamycin",
    "Trimethoprim-Sulfa",
    "Azithromycin",
    "Ciprofloxacin",
    // Pain relief
    "Carprofen",
    "Meloxicam",
    "Firocoxib",
    "Gabapentin",
    "Tramadol",
    "Buprenorphine",
    "Morphine",
    "Aspirin",
    "Acetaminophen",
    // Deworming
    "Fenbendazole",
    "Pyrantel Pamoate",
    "Praziquantel",
    "Ivermectin",
    "Milbemycin",
    "Selamectin",
    "Moxidectin",
    // Flea & tick
    "Fipronil",
    "Imidacloprid",
    "Fluralaner",
    "Afoxolaner",
    "Sarolaner",
    "Spinosad",
    "Nitenpyram",
    "Lufenuron",
    // Vitamins & supplements
    "Multivitamin",
    "Vitamin B Complex",
    "Vitamin E",
    "Calcium",
    "Phosphorus",
    "Omega-3 Fatty Acids",
    "Probiotics",
    "Glucosamine",
    "Chondroitin",
    // Wound care
    "Chlorhexidine",
    "Povidone-Iodine",
    "Silver Sulfadiazine",
    "Triple Antibiotic Ointment",
    "Hydrogen Peroxide",
    "Saline Solution",
    // Eye & ear
    "Gentamicin Eye Drops",
    "Tobramycin Eye Drops",
    "Ciprofloxacin Eye Drops",
    "Ear Cleaner",
    "Otomax",
    "Tresaderm",
    // Respiratory
    "Theophylline",
    "Terbutaline",
    "Aminophylline",
    "Albuterol",
    // Digestive
    "Metoclopramide",
    "Ondansetron",
    "Famotidine",
    "Omeprazole",
    "Sucralfate",
    "Lactulose",
    "Metronidazole",
    // Cardiovascular
    "Enalapril",
    "Benazepril",
    "Furosemide",
    "Digoxin",
    "Atenolol",
    "Diltiazem",
    // Dermatology
    "Ketoconazole",
    "Miconazole",
    "Chlorhexidine Shampoo",
    "Hydrocortisone",
    "Prednisolone",
    "Cyclosporine",
    // Hormonal
    "Insulin",
    "Levothyroxine",
    "Prednisone",
    "Prednisolone",
    "Deslorelin",
    // Vaccines
    "DHPP",
    "Rabies",
    "Bordetella",
    "Lyme",
    "Leptospirosis",
    "Canine Influenza",
    // Anesthesia
    "Isoflurane",
    "Sevoflurane",
    "Propofol",
    "Ketamine",
    "Dexmedetomidine",
    // Other common
    "Diphenhydramine",
    "Loperamide",
    "Kaolin-Pectin",
    "Activated Charcoal",
    "Atropine",
    "Epinephrine",
    "Diazepam",
    "Phenobarbital",
];

/// Frequently dispensed medicines, shown before the user types anything
pub const POPULAR_MEDICINES: &[&str] = &[
    "Amoxicillin",
    "Carprofen",
    "Meloxicam",
    "Fenbendazole",
    "Fipronil",
    "Multivitamin",
    "Chlorhexidine",
    "Metoclopramide",
    "Enalapril",
    "Ketoconazole",
    "Insulin",
    "DHPP",
    "Rabies",
    "Diphenhydramine",
    "Atropine",
];

/// Whether `category` is one of the known categories (exact match)
pub fn is_known_category(category: &str) -> bool {
    VETERINARY_MEDICINE_CATEGORIES.contains(&category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_category_is_known() {
        assert!(is_known_category(DEFAULT_CATEGORY));
    }

    #[test]
    fn test_category_match_is_exact() {
        assert!(is_known_category("Antibiotics"));
        assert!(!is_known_category("antibiotics"));
        assert!(!is_known_category(" Antibiotics"));
    }

    #[test]
    fn test_popular_medicines_are_in_table() {
        for name in POPULAR_MEDICINES {
            assert!(VETERINARY_MEDICINES.contains(name), "{name} missing");
        }
    }
}
