//! Append-only record store boundary.
//!
//! This module defines the infrastructure-facing abstraction over the two
//! external stores (registrations, usages) without making any assumptions
//! about the substrate behind them.

pub mod in_memory;
pub mod r#trait;

use std::sync::RwLock;

use serde_json::Value as JsonValue;

use labstock_events::Row;

pub use in_memory::{InMemoryWorkbook, SheetStore};
pub use r#trait::{RecordStore, SheetRef, StoreError};

/// Adapter that caches `read_all` and drops the cache after every write.
///
/// This keeps the ordering invariant: **invalidate happens as soon as a write
/// succeeds**, so the next read in the same session sees the new row. Writes
/// made by other processes are only seen after `refresh`.
#[derive(Debug)]
pub struct CachingStore<S> {
    store: S,
    cached: RwLock<Option<Vec<Row>>>,
}

impl<S> CachingStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cached: RwLock::new(None),
        }
    }

    /// Whether a cached read is currently held.
    pub fn is_warm(&self) -> bool {
        self.cached.read().map(|c| c.is_some()).unwrap_or(false)
    }

    fn invalidate(&self) {
        if let Ok(mut cached) = self.cached.write() {
            *cached = None;
        }
    }
}

impl<S> RecordStore for CachingStore<S>
where
    S: RecordStore,
{
    fn append(&self, row: Vec<JsonValue>) -> Result<(), StoreError> {
        // 1) Write through (the durable step)
        self.store.append(row)?;

        // 2) Drop the cached scan before anyone can read it again
        self.invalidate();
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Row>, StoreError> {
        if let Ok(cached) = self.cached.read() {
            if let Some(rows) = cached.as_ref() {
                tracing::debug!(rows = rows.len(), "store read served from cache");
                return Ok(rows.clone());
            }
        }

        let rows = self.store.read_all()?;
        if let Ok(mut cached) = self.cached.write() {
            *cached = Some(rows.clone());
        }
        Ok(rows)
    }

    fn update_cell(
        &self,
        row_index: usize,
        column_index: usize,
        value: JsonValue,
    ) -> Result<(), StoreError> {
        self.store.update_cell(row_index, column_index, value)?;
        self.invalidate();
        Ok(())
    }

    fn refresh(&self) {
        self.invalidate();
        self.store.refresh();
    }
}
