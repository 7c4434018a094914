//! Raw row -> typed record normalization.
//!
//! Laboratory data entry is messy, so this layer is permissive about values
//! and strict about shape:
//! - numeric cells that do not parse read as 0
//! - date cells that do not parse read as absent
//! - absent text cells read as empty strings
//! - a missing *required column* fails the whole read once, so callers never
//!   see a partial set of lots

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value as JsonValue;
use thiserror::Error;

use labstock_core::non_negative;
use labstock_events::schema::{self, registration as reg_cols, usage as use_cols};
use labstock_events::{
    DATE_FORMAT, RegistrationRecord, Row, TIMESTAMP_FORMAT, UsageRecord, cell_text,
};

/// Which store a schema failure was found in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StoreKind {
    Registration,
    Usage,
}

impl core::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoreKind::Registration => f.write_str("registration store"),
            StoreKind::Usage => f.write_str("usage store"),
        }
    }
}

/// Required columns are absent from a store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{store} is missing required column(s): {}", .missing.join(", "))]
pub struct SchemaError {
    pub store: StoreKind,
    pub missing: Vec<String>,
}

/// Policy values applied while normalizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeOptions {
    /// Alert threshold for rows whose threshold cell is absent or blank.
    pub default_alert_threshold: f64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            default_alert_threshold: 0.0,
        }
    }
}

fn check_columns(rows: &[Row], required: &[&str], store: StoreKind) -> Result<(), SchemaError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !rows.iter().any(|r| r.contains_key(**col)))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError { store, missing })
    }
}

fn text(row: &Row, column: &str) -> String {
    row.get(column).map(cell_text).unwrap_or_default()
}

/// Parse a numeric cell, coercing anything unparsable to 0.
pub fn parse_quantity(value: Option<&JsonValue>) -> f64 {
    let parsed = match value {
        Some(JsonValue::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(JsonValue::String(s)) => without_thousands_separators(s.trim())
            .and_then(|t| t.parse::<f64>().ok())
            .unwrap_or(0.0),
        _ => 0.0,
    };
    if parsed.is_finite() { parsed } else { 0.0 }
}

/// Drop `,` separators from a number like `1,250.5`.
///
/// Commas must group the integer digits in threes; anything else (`1,5`,
/// `12,34`) is rejected.
fn without_thousands_separators(text: &str) -> Option<String> {
    if !text.contains(',') {
        return Some(text.to_string());
    }
    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text, None),
    };
    if fraction.is_some_and(|f| f.contains(',')) {
        return None;
    }
    let digits = integer.trim_start_matches(['-', '+']);
    let mut groups = digits.split(',');
    let lead = groups.next()?;
    let lead_ok = (1..=3).contains(&lead.len()) && lead.bytes().all(|b| b.is_ascii_digit());
    let rest_ok = groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()));
    if lead_ok && rest_ok {
        Some(text.replace(',', ""))
    } else {
        None
    }
}

/// Parse a date cell; `None` when it does not hold a recognisable date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    for fmt in [DATE_FORMAT, "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(d);
        }
    }
    parse_timestamp(text).map(|t| t.date())
}

/// Parse a timestamp cell; date-only values read as midnight.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    for fmt in [TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(t);
        }
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t.naive_utc());
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn alert_threshold(row: &Row, options: &NormalizeOptions) -> f64 {
    match row.get(reg_cols::ALERT_THRESHOLD) {
        None | Some(JsonValue::Null) => options.default_alert_threshold,
        Some(JsonValue::String(s)) if s.trim().is_empty() => options.default_alert_threshold,
        value => non_negative(parse_quantity(value)),
    }
}

fn registration_from_row(row: &Row, options: &NormalizeOptions) -> RegistrationRecord {
    RegistrationRecord {
        product: text(row, reg_cols::PRODUCT),
        manufacturer: text(row, reg_cols::MANUFACTURER),
        catalog_number: text(row, reg_cols::CATALOG_NUMBER),
        lot_number: text(row, reg_cols::LOT_NUMBER),
        initial_quantity: non_negative(parse_quantity(row.get(reg_cols::INITIAL_QUANTITY))),
        unit: text(row, reg_cols::UNIT),
        expiry: parse_date(&text(row, reg_cols::EXPIRY)),
        location: text(row, reg_cols::LOCATION),
        registered_at: parse_timestamp(&text(row, reg_cols::REGISTERED_AT)),
        registrant: text(row, reg_cols::REGISTRANT),
        alert_threshold: alert_threshold(row, options),
        muted: schema::parse_mute_flag(&text(row, reg_cols::MUTED)),
    }
}

fn usage_from_row(row: &Row) -> UsageRecord {
    UsageRecord {
        used_at: parse_timestamp(&text(row, use_cols::TIMESTAMP)),
        product: text(row, use_cols::PRODUCT),
        lot_number: text(row, use_cols::LOT_NUMBER),
        quantity: non_negative(parse_quantity(row.get(use_cols::QUANTITY))),
        user: text(row, use_cols::USER),
        note: text(row, use_cols::NOTE),
    }
}

/// Normalize every registration row, or fail once if required columns are absent.
///
/// An empty store is valid and yields no records.
pub fn normalize_registrations(
    rows: &[Row],
    options: &NormalizeOptions,
) -> Result<Vec<RegistrationRecord>, SchemaError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    check_columns(rows, &reg_cols::REQUIRED, StoreKind::Registration)?;
    Ok(rows.iter().map(|r| registration_from_row(r, options)).collect())
}

/// Normalize every usage row, or fail once if required columns are absent.
pub fn normalize_usages(rows: &[Row]) -> Result<Vec<UsageRecord>, SchemaError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    check_columns(rows, &use_cols::REQUIRED, StoreKind::Usage)?;
    Ok(rows.iter().map(usage_from_row).collect())
}
