use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use labstock_events::Row;
use std::sync::Arc;

/// Address of a store: a named document and a named tab inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetRef {
    pub document: String,
    pub tab: String,
}

impl SheetRef {
    pub fn new(document: impl Into<String>, tab: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            tab: tab.into(),
        }
    }
}

impl core::fmt::Display for SheetRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.document, self.tab)
    }
}

/// Store operation error.
///
/// These are **infrastructure errors** (a document or tab that cannot be
/// located, bad cell addresses, backend failures), as opposed to validation
/// failures of the records themselves. None of them is retried automatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: document '{0}' not found")]
    DocumentNotFound(String),

    #[error("store unavailable: tab '{tab}' not found in document '{document}'")]
    TabNotFound { document: String, tab: String },

    #[error("row {row_index} out of range ({rows} data rows)")]
    RowOutOfRange { row_index: usize, rows: usize },

    #[error("column {column_index} out of range ({columns} columns)")]
    ColumnOutOfRange { column_index: usize, columns: usize },

    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether the document or tab could not be located at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::DocumentNotFound(_) | Self::TabNotFound { .. })
    }
}

/// Append-only record store (one named document + tab).
///
/// Rows are written positionally and read back keyed by the header row.
///
/// - `append` adds one row at the end; history is never rewritten
/// - `read_all` is a full scan, oldest row first; an empty store is valid
/// - `update_cell` exists only for the mute flag write-back; `row_index` is the
///   zero-based position of a data row in `read_all` order
/// - `refresh` drops any cached reads so the next `read_all` sees the latest data
pub trait RecordStore: Send + Sync {
    fn append(&self, row: Vec<JsonValue>) -> Result<(), StoreError>;

    fn read_all(&self) -> Result<Vec<Row>, StoreError>;

    fn update_cell(
        &self,
        row_index: usize,
        column_index: usize,
        value: JsonValue,
    ) -> Result<(), StoreError>;

    fn refresh(&self) {}
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn append(&self, row: Vec<JsonValue>) -> Result<(), StoreError> {
        (**self).append(row)
    }

    fn read_all(&self) -> Result<Vec<Row>, StoreError> {
        (**self).read_all()
    }

    fn update_cell(
        &self,
        row_index: usize,
        column_index: usize,
        value: JsonValue,
    ) -> Result<(), StoreError> {
        (**self).update_cell(row_index, column_index, value)
    }

    fn refresh(&self) {
        (**self).refresh()
    }
}
