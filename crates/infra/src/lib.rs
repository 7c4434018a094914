//! Infrastructure layer: record stores, caching, config, and the ledger service.

pub mod config;
pub mod ledger;
pub mod store;

mod integration_tests;

pub use config::LedgerConfig;
pub use ledger::{InventoryLedger, InventoryView, LedgerError};
pub use store::{CachingStore, InMemoryWorkbook, RecordStore, SheetRef, SheetStore, StoreError};
