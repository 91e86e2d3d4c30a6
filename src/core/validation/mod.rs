//! Input validation and sanitization
//!
//! Two layers:
//!
//! - [`fields`] - scalar validators for text, categories, numbers, dates, and ids
//! - [`record`] - composes the field validators over a whole [`MedicineDraft`]
//!
//! Every validator takes `today` explicitly so date windows are deterministic.
//!
//! [`MedicineDraft`]: crate::domain::MedicineDraft

pub mod fields;
pub mod record;

pub use fields::{
    parse_date, sanitize_string, validate_category, validate_date, validate_expiry_date,
    validate_id, validate_number, validate_purchase_date, validate_text, DateOptions,
    FieldResult, NumberOptions,
};
pub use record::{validate_medicine, RecordValidation, SanitizedFields};
