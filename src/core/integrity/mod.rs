//! Data integrity for persisted collections
//!
//! - [`guard`] - structural type guard, best-effort repair, and array validation
//! - [`consistency`] - duplicate detection and cross-field consistency reports

pub mod consistency;
pub mod guard;

pub use consistency::{
    check_data_consistency, find_duplicates, ConsistencyIssue, ConsistencyReport,
};
pub use guard::{is_valid_medicine, sanitize_medicine, validate_medicines_array};
