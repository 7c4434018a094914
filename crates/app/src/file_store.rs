//! JSON-file backed record stores.
//!
//! Mirrors the spreadsheet layout on disk: a document is a directory under the
//! data root and a tab is `<tab>.json` inside it, holding a header row and
//! positional data rows.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use labstock_events::Row;
use labstock_infra::{RecordStore, SheetRef, StoreError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SheetFile {
    header: Vec<String>,
    rows: Vec<Vec<JsonValue>>,
}

/// Root directory holding one subdirectory per document.
#[derive(Debug, Clone)]
pub struct JsonWorkspace {
    root: PathBuf,
}

impl JsonWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the document directory and an empty tab if they do not exist yet.
    ///
    /// Returns `true` when a new tab file was written.
    pub fn init_sheet(&self, sheet: &SheetRef, header: &[&str]) -> Result<bool, StoreError> {
        let store = self.open(sheet.clone());
        if store.path.exists() {
            return Ok(false);
        }
        fs::create_dir_all(self.root.join(&sheet.document)).map_err(backend)?;
        store.write(&SheetFile {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        })?;
        Ok(true)
    }

    pub fn open(&self, sheet: SheetRef) -> JsonFileStore {
        let path = self
            .root
            .join(&sheet.document)
            .join(format!("{}.json", sheet.tab));
        JsonFileStore {
            document_dir: self.root.join(&sheet.document),
            path,
            sheet,
        }
    }
}

fn backend(e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// One tab stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    document_dir: PathBuf,
    path: PathBuf,
    sheet: SheetRef,
}

impl JsonFileStore {
    fn read(&self) -> Result<SheetFile, StoreError> {
        if !self.document_dir.is_dir() {
            return Err(StoreError::DocumentNotFound(self.sheet.document.clone()));
        }
        if !self.path.is_file() {
            return Err(StoreError::TabNotFound {
                document: self.sheet.document.clone(),
                tab: self.sheet.tab.clone(),
            });
        }
        let text = fs::read_to_string(&self.path).map_err(backend)?;
        serde_json::from_str(&text).map_err(backend)
    }

    fn write(&self, sheet: &SheetFile) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(sheet).map_err(backend)?;
        fs::write(&self.path, text).map_err(backend)
    }
}

impl RecordStore for JsonFileStore {
    fn append(&self, row: Vec<JsonValue>) -> Result<(), StoreError> {
        let mut sheet = self.read()?;
        sheet.rows.push(row);
        self.write(&sheet)
    }

    fn read_all(&self) -> Result<Vec<Row>, StoreError> {
        let sheet = self.read()?;
        Ok(sheet
            .rows
            .iter()
            .map(|cells| {
                sheet
                    .header
                    .iter()
                    .enumerate()
                    .map(|(i, col)| (col.clone(), cells.get(i).cloned().unwrap_or(JsonValue::Null)))
                    .collect()
            })
            .collect())
    }

    fn update_cell(
        &self,
        row_index: usize,
        column_index: usize,
        value: JsonValue,
    ) -> Result<(), StoreError> {
        let mut sheet = self.read()?;
        let columns = sheet.header.len();
        if column_index >= columns {
            return Err(StoreError::ColumnOutOfRange { column_index, columns });
        }
        let rows = sheet.rows.len();
        let cells = sheet
            .rows
            .get_mut(row_index)
            .ok_or(StoreError::RowOutOfRange { row_index, rows })?;
        if cells.len() <= column_index {
            cells.resize(column_index + 1, JsonValue::Null);
        }
        cells[column_index] = value;
        self.write(&sheet)
    }
}
