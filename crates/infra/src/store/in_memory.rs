use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value as JsonValue;

use labstock_events::Row;

use super::r#trait::{RecordStore, SheetRef, StoreError};

#[derive(Debug, Default, Clone)]
struct Sheet {
    header: Vec<String>,
    rows: Vec<Vec<JsonValue>>,
}

/// In-memory stand-in for a set of spreadsheet documents.
///
/// Intended for tests/dev. Documents hold named tabs; each tab has a header
/// row and positional data rows.
#[derive(Debug, Default)]
pub struct InMemoryWorkbook {
    documents: RwLock<HashMap<String, HashMap<String, Sheet>>>,
}

impl InMemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or reset) a tab with the given header, creating the document if needed.
    pub fn create_sheet(&self, sheet: &SheetRef, header: &[&str]) -> Result<(), StoreError> {
        let mut docs = self.documents.write().map_err(|_| poisoned())?;
        docs.entry(sheet.document.clone()).or_default().insert(
            sheet.tab.clone(),
            Sheet {
                header: header.iter().map(|h| h.to_string()).collect(),
                rows: Vec::new(),
            },
        );
        Ok(())
    }

    /// Create an empty document with no tabs.
    pub fn create_document(&self, document: &str) -> Result<(), StoreError> {
        let mut docs = self.documents.write().map_err(|_| poisoned())?;
        docs.entry(document.to_string()).or_default();
        Ok(())
    }

    /// Open a tab as a record store. Lookup happens on every operation.
    pub fn open(self: &Arc<Self>, sheet: SheetRef) -> SheetStore {
        SheetStore {
            workbook: Arc::clone(self),
            sheet,
        }
    }

    fn with_sheet<T>(
        &self,
        sheet: &SheetRef,
        f: impl FnOnce(&Sheet) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let docs = self.documents.read().map_err(|_| poisoned())?;
        let tab = locate(&docs, sheet)?;
        f(tab)
    }

    fn with_sheet_mut<T>(
        &self,
        sheet: &SheetRef,
        f: impl FnOnce(&mut Sheet) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut docs = self.documents.write().map_err(|_| poisoned())?;
        let tabs = docs
            .get_mut(&sheet.document)
            .ok_or_else(|| StoreError::DocumentNotFound(sheet.document.clone()))?;
        let tab = tabs.get_mut(&sheet.tab).ok_or_else(|| StoreError::TabNotFound {
            document: sheet.document.clone(),
            tab: sheet.tab.clone(),
        })?;
        f(tab)
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

fn locate<'a>(
    docs: &'a HashMap<String, HashMap<String, Sheet>>,
    sheet: &SheetRef,
) -> Result<&'a Sheet, StoreError> {
    let tabs = docs
        .get(&sheet.document)
        .ok_or_else(|| StoreError::DocumentNotFound(sheet.document.clone()))?;
    tabs.get(&sheet.tab).ok_or_else(|| StoreError::TabNotFound {
        document: sheet.document.clone(),
        tab: sheet.tab.clone(),
    })
}

/// One tab of an [`InMemoryWorkbook`], exposed as a [`RecordStore`].
#[derive(Debug, Clone)]
pub struct SheetStore {
    workbook: Arc<InMemoryWorkbook>,
    sheet: SheetRef,
}

impl RecordStore for SheetStore {
    fn append(&self, row: Vec<JsonValue>) -> Result<(), StoreError> {
        self.workbook.with_sheet_mut(&self.sheet, |tab| {
            tab.rows.push(row);
            Ok(())
        })
    }

    fn read_all(&self) -> Result<Vec<Row>, StoreError> {
        self.workbook.with_sheet(&self.sheet, |tab| {
            Ok(tab
                .rows
                .iter()
                .map(|cells| {
                    tab.header
                        .iter()
                        .enumerate()
                        .map(|(i, col)| {
                            (col.clone(), cells.get(i).cloned().unwrap_or(JsonValue::Null))
                        })
                        .collect()
                })
                .collect())
        })
    }

    fn update_cell(
        &self,
        row_index: usize,
        column_index: usize,
        value: JsonValue,
    ) -> Result<(), StoreError> {
        self.workbook.with_sheet_mut(&self.sheet, |tab| {
            let columns = tab.header.len();
            if column_index >= columns {
                return Err(StoreError::ColumnOutOfRange { column_index, columns });
            }
            let rows = tab.rows.len();
            let cells = tab
                .rows
                .get_mut(row_index)
                .ok_or(StoreError::RowOutOfRange { row_index, rows })?;
            if cells.len() <= column_index {
                cells.resize(column_index + 1, JsonValue::Null);
            }
            cells[column_index] = value;
            Ok(())
        })
    }
}
