//! Command-line front end: file-backed stores and printable reports.

pub mod file_store;
pub mod report;

use labstock_events::schema::{registration as reg_cols, usage as use_cols};
use labstock_infra::{CachingStore, InventoryLedger, LedgerConfig, StoreError};

pub use file_store::{JsonFileStore, JsonWorkspace};
pub use report::{AlertSummary, LotLine, StockReport};

pub type FileLedger = InventoryLedger<CachingStore<JsonFileStore>, CachingStore<JsonFileStore>>;

/// Create both sheets with their headers if they are missing.
pub fn init_workspace(workspace: &JsonWorkspace, config: &LedgerConfig) -> Result<(), StoreError> {
    for (sheet, header) in [
        (&config.registration_sheet, &reg_cols::COLUMNS[..]),
        (&config.usage_sheet, &use_cols::COLUMNS[..]),
    ] {
        if workspace.init_sheet(sheet, header)? {
            tracing::info!(sheet = %sheet, "sheet created");
        }
    }
    Ok(())
}

pub fn open_ledger(workspace: &JsonWorkspace, config: LedgerConfig) -> FileLedger {
    let registrations = CachingStore::new(workspace.open(config.registration_sheet.clone()));
    let usages = CachingStore::new(workspace.open(config.usage_sheet.clone()));
    InventoryLedger::new(registrations, usages, config)
}
