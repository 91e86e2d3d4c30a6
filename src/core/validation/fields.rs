//! Field-level validators
//!
//! Pure functions that validate and sanitize one scalar value each. They return
//! `Ok(sanitized)` or `Err(message)`; nothing here panics or logs, and emptiness is
//! treated as "not provided" everywhere except for identifiers.

use crate::domain::catalog::DEFAULT_CATEGORY;
use crate::domain::ids::{MedicineId, MAX_ID_LENGTH};
use crate::domain::medicine::NumberInput;
use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Outcome of a single field validation
pub type FieldResult<T> = std::result::Result<T, String>;

/// Largest integer exactly representable as an f64
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Length cap applied to category input before matching
pub const CATEGORY_LENGTH: usize = 100;

struct MarkupPatterns {
    script: Regex,
    tag: Regex,
    javascript: Regex,
    event_handler: Regex,
}

fn markup_patterns() -> &'static MarkupPatterns {
    static PATTERNS: OnceLock<MarkupPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| MarkupPatterns {
        script: Regex::new(r"(?is)<script\b.*?</script>").expect("valid script pattern"),
        tag: Regex::new(r"<[^>]+>").expect("valid tag pattern"),
        javascript: Regex::new(r"(?i)javascript:").expect("valid protocol pattern"),
        event_handler: Regex::new(r"(?i)on\w+\s*=").expect("valid handler pattern"),
    })
}

fn numeric_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number pattern")
    })
}

/// Strips markup and script vectors, trims, and truncates to `max_length` characters
///
/// # Examples
///
/// ```
/// use vetstock::core::validation::fields::sanitize_string;
///
/// let clean = sanitize_string("<b>Amoxi</b>cillin<script>alert(1)</script>", 200);
/// assert_eq!(clean, "Amoxicillin");
/// ```
pub fn sanitize_string(input: &str, max_length: usize) -> String {
    let patterns = markup_patterns();
    let without_scripts = patterns.script.replace_all(input, "");
    let without_tags = patterns.tag.replace_all(&without_scripts, "");
    let without_protocol = patterns.javascript.replace_all(&without_tags, "");
    let without_handlers = patterns.event_handler.replace_all(&without_protocol, "");

    truncate_chars(without_handlers.trim(), max_length)
}

/// Returns at most `max_length` characters of `input`
pub fn truncate_chars(input: &str, max_length: usize) -> String {
    input.chars().take(max_length).collect()
}

/// Validates optional free text
///
/// Absent or empty input is valid and yields an empty string; callers decide whether
/// to substitute a default or omit the field.
pub fn validate_text(input: Option<&str>, max_length: usize) -> FieldResult<String> {
    let Some(raw) = input.filter(|s| !s.is_empty()) else {
        return Ok(String::new());
    };

    let sanitized = sanitize_string(raw, max_length);
    if sanitized.chars().count() > max_length {
        return Err(format!("Must be less than {max_length} characters"));
    }
    Ok(sanitized)
}

/// Resolves a category against the allowed set
///
/// Never fails: anything that is not an exact match, including empty input, becomes
/// [`DEFAULT_CATEGORY`].
pub fn validate_category(input: Option<&str>, allowed: &[&str]) -> String {
    let Some(raw) = input.filter(|s| !s.is_empty()) else {
        return DEFAULT_CATEGORY.to_string();
    };

    let sanitized = sanitize_string(raw, CATEGORY_LENGTH);
    if allowed.contains(&sanitized.as_str()) {
        sanitized
    } else {
        DEFAULT_CATEGORY.to_string()
    }
}

/// Constraints for [`validate_number`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberOptions {
    pub min: f64,
    pub max: f64,
    pub allow_zero: bool,
    pub allow_negative: bool,
    /// Decimal places kept after rounding
    pub precision: u32,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: MAX_SAFE_INTEGER,
            allow_zero: true,
            allow_negative: false,
            precision: 2,
        }
    }
}

impl NumberOptions {
    /// Non-negative value up to `max`, rounded to `precision` decimals
    pub fn bounded(max: f64, precision: u32) -> Self {
        Self {
            max,
            precision,
            ..Self::default()
        }
    }
}

/// Validates a numeric field given as a number or a numeric string
///
/// Strings are read by their leading numeric prefix (`"12.5 ml"` is 12.5). Absent or
/// blank input is valid and yields 0.
///
/// # Examples
///
/// ```
/// use vetstock::core::validation::fields::{validate_number, NumberOptions};
/// use vetstock::domain::NumberInput;
///
/// let opts = NumberOptions::bounded(1_000_000.0, 2);
/// assert_eq!(validate_number(Some(&NumberInput::from("12.346")), opts), Ok(12.35));
/// assert_eq!(validate_number(None, opts), Ok(0.0));
/// assert!(validate_number(Some(&NumberInput::from("-1")), opts).is_err());
/// ```
pub fn validate_number(input: Option<&NumberInput>, options: NumberOptions) -> FieldResult<f64> {
    let value = match input {
        None => return Ok(0.0),
        Some(NumberInput::Text(text)) if text.trim().is_empty() => return Ok(0.0),
        Some(NumberInput::Text(text)) => parse_float_prefix(text),
        Some(NumberInput::Number(n)) => Some(*n),
    };

    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return Err("Invalid number format".to_string()),
    };

    if !options.allow_negative && value < 0.0 {
        return Err("Value cannot be negative".to_string());
    }

    if !options.allow_zero && value == 0.0 {
        return Err("Value cannot be zero".to_string());
    }

    if value < options.min {
        return Err(format!("Value must be at least {}", format_plain(options.min)));
    }

    if value > options.max {
        return Err(format!(
            "Value must be less than {}",
            group_thousands(options.max)
        ));
    }

    Ok(round_to(value, options.precision))
}

/// Rounds to `precision` decimal places by scale-and-round
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

fn parse_float_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    numeric_prefix()
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Renders the upper limit for "Value must be less than ..." errors, grouped as `1,000,000`
fn group_thousands(value: f64) -> String {
    let plain = format_plain(value.abs());
    let (integer, fraction) = match plain.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (plain, None),
    };

    let mut grouped = String::new();
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Parses the date formats people and older versions are known to produce
///
/// Timestamps with an offset are converted to UTC before the date is taken.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Some(date);
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(input, format) {
            return Some(timestamp.date());
        }
    }

    None
}

/// Formats a date as `YYYY-MM-DD`
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `today` shifted by a signed number of years, clamping to month end
pub fn years_from(today: NaiveDate, years: i32) -> NaiveDate {
    let months = Months::new(years.unsigned_abs() * 12);
    let shifted = if years >= 0 {
        today.checked_add_months(months)
    } else {
        today.checked_sub_months(months)
    };
    shifted.unwrap_or(today)
}

/// Constraints for [`validate_date`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOptions {
    pub allow_past: bool,
    pub allow_future: bool,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

impl Default for DateOptions {
    fn default() -> Self {
        Self {
            allow_past: true,
            allow_future: true,
            min_date: None,
            max_date: None,
        }
    }
}

/// Validates an optional date against generic range constraints
///
/// Returns `Ok(None)` for absent or blank input.
pub fn validate_date(
    input: Option<&str>,
    options: DateOptions,
    today: NaiveDate,
) -> FieldResult<Option<NaiveDate>> {
    let Some(raw) = input.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };

    let date = parse_date(raw).ok_or_else(|| "Invalid date format".to_string())?;

    if !options.allow_past && date < today {
        return Err("Date cannot be in the past".to_string());
    }

    if !options.allow_future && date > today {
        return Err("Date cannot be in the future".to_string());
    }

    if let Some(min) = options.min_date {
        if date < min {
            return Err(format!("Date must be after {}", iso_date(min)));
        }
    }

    if let Some(max) = options.max_date {
        if date > max {
            return Err(format!("Date must be before {}", iso_date(max)));
        }
    }

    Ok(Some(date))
}

/// Validates an expiry date: optional, at most 5 years past and 10 years ahead
pub fn validate_expiry_date(input: Option<&str>, today: NaiveDate) -> FieldResult<Option<NaiveDate>> {
    let Some(raw) = input.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };

    let date = parse_date(raw).ok_or_else(|| "Invalid expiry date format".to_string())?;

    if date > years_from(today, 10) {
        return Err("Expiry date cannot be more than 10 years in the future".to_string());
    }

    if date < years_from(today, -5) {
        return Err("Expiry date is too far in the past".to_string());
    }

    Ok(Some(date))
}

/// Validates a purchase date: defaults to `today`, at most 10 years past and 1 year ahead
pub fn validate_purchase_date(input: Option<&str>, today: NaiveDate) -> FieldResult<NaiveDate> {
    let Some(raw) = input.filter(|s| !s.trim().is_empty()) else {
        return Ok(today);
    };

    let date = parse_date(raw).ok_or_else(|| "Invalid purchase date format".to_string())?;

    if date > years_from(today, 1) {
        return Err("Purchase date cannot be more than 1 year in the future".to_string());
    }

    if date < years_from(today, -10) {
        return Err("Purchase date is too far in the past".to_string());
    }

    Ok(date)
}

/// Validates an identifier; unlike other fields, emptiness is an error
pub fn validate_id(input: Option<&str>) -> FieldResult<MedicineId> {
    MedicineId::new(input.unwrap_or_default())
}

/// Caps a caller-supplied identifier at the maximum length, then validates it
pub fn validate_supplied_id(input: &str) -> FieldResult<MedicineId> {
    validate_id(Some(&truncate_chars(input, MAX_ID_LENGTH)))
}
