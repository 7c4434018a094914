use serde_json::Value as JsonValue;

/// A record in one of the append-only inventory logs.
///
/// Records are:
/// - **immutable** (treat them as facts; corrections are new records)
/// - **versioned** (row layout evolution)
/// - **positional** when written: stores take an ordered list of cells
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable record type identifier (e.g. "inventory.lot.registered").
    fn event_type(&self) -> &'static str;

    /// Row layout version for this record type.
    fn version(&self) -> u32;

    /// Encode as an ordered row of scalar cells, in the store's column order.
    fn to_row(&self) -> Vec<JsonValue>;
}
