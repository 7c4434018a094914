//! Raw store rows.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

/// One row as read from a store: column name -> raw cell value.
pub type Row = BTreeMap<String, JsonValue>;

/// Timestamp layout written to (and preferred when reading from) the stores.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date layout used for expiry dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build a row from `(column, value)` pairs.
pub fn row_from<I, K>(cells: I) -> Row
where
    I: IntoIterator<Item = (K, JsonValue)>,
    K: Into<String>,
{
    cells.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Render a cell as trimmed text (numbers in their JSON form, null as empty).
pub fn cell_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
