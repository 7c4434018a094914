//! Printable summaries of ledger reads.

use chrono::NaiveDate;
use serde::Serialize;

use labstock_infra::InventoryView;
use labstock_inventory::{AlertReport, InventoryEntry, StockAlert};

/// One lot as shown to operators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LotLine {
    pub product: String,
    pub catalog_number: String,
    pub lot_number: String,
    pub location: String,
    pub unit: String,
    pub expiry: Option<NaiveDate>,
    pub initial_quantity: f64,
    pub total_used: f64,
    pub current_stock: f64,
    /// Percent remaining, clamped to 0..=100.
    pub ratio: f64,
    pub status: StockAlert,
}

impl From<&InventoryEntry> for LotLine {
    fn from(entry: &InventoryEntry) -> Self {
        let lot = &entry.lot;
        Self {
            product: lot.key.product.clone(),
            catalog_number: lot.key.catalog_number.clone(),
            lot_number: lot.key.lot_number.clone(),
            location: lot.location.clone(),
            unit: lot.unit.clone(),
            expiry: lot.expiry,
            initial_quantity: lot.initial_quantity,
            total_used: entry.total_used,
            current_stock: entry.current_stock,
            ratio: entry.display_ratio(),
            status: entry.stock_alert,
        }
    }
}

fn lines(entries: &[InventoryEntry]) -> Vec<LotLine> {
    entries.iter().map(LotLine::from).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockReport {
    pub lots: Vec<LotLine>,
    /// Schema problems that caused the lot list to be withheld.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schema_errors: Vec<String>,
}

impl From<&InventoryView> for StockReport {
    fn from(view: &InventoryView) -> Self {
        Self {
            lots: lines(&view.entries),
            schema_errors: view.schema_errors.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertSummary {
    pub as_of: NaiveDate,
    pub alert_count: usize,
    pub expired: Vec<LotLine>,
    pub expiring_soon: Vec<LotLine>,
    pub low_stock: Vec<LotLine>,
    pub out_of_stock: Vec<LotLine>,
    pub muted: Vec<LotLine>,
    pub ok: usize,
}

impl AlertSummary {
    pub fn new(as_of: NaiveDate, report: &AlertReport) -> Self {
        Self {
            as_of,
            alert_count: report.alert_count(),
            expired: lines(&report.expired),
            expiring_soon: lines(&report.expiring_soon),
            low_stock: lines(&report.low_stock),
            out_of_stock: lines(&report.out_of_stock),
            muted: lines(&report.muted),
            ok: report.ok.len(),
        }
    }
}
