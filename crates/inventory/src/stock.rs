//! Current stock per lot.
//!
//! Stock is never stored. Every read recomputes it from the full registration
//! and usage history, so the same history always yields the same entries.

use serde::{Deserialize, Serialize};

use labstock_core::{LotKey, UsageKey, canonical_sum};
use labstock_events::{RegistrationRecord, UsageRecord};

use crate::lot::{LotSnapshot, aggregate_lots};
use crate::usage::{UsageTotals, aggregate_usage};

/// Stock-only alert state of a lot (expiry is classified separately, against a date).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockAlert {
    InStock,
    LowStock,
    OutOfStock,
    Muted,
}

/// A lot joined with its consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub lot: LotSnapshot,
    pub total_used: f64,
    /// `initial_quantity - total_used`; negative only if the store was edited directly.
    pub current_stock: f64,
    /// Percentage of the initial quantity left (unclamped; 0 when nothing was registered).
    pub stock_ratio: f64,
    pub stock_alert: StockAlert,
}

impl InventoryEntry {
    pub fn key(&self) -> &LotKey {
        &self.lot.key
    }

    /// `stock_ratio` clamped to [0, 100] for display.
    pub fn display_ratio(&self) -> f64 {
        self.stock_ratio.clamp(0.0, 100.0)
    }

    pub fn is_muted(&self) -> bool {
        self.lot.muted
    }
}

fn stock_ratio(current_stock: f64, initial_quantity: f64) -> f64 {
    if initial_quantity > 0.0 {
        current_stock * 100.0 / initial_quantity
    } else {
        0.0
    }
}

fn stock_alert(lot: &LotSnapshot, current_stock: f64) -> StockAlert {
    if lot.muted {
        StockAlert::Muted
    } else if current_stock <= 0.0 {
        StockAlert::OutOfStock
    } else if current_stock <= lot.alert_threshold {
        StockAlert::LowStock
    } else {
        StockAlert::InStock
    }
}

/// Join one lot with its total consumption.
pub fn compute_entry(lot: LotSnapshot, total_used: f64) -> InventoryEntry {
    let current_stock = lot.initial_quantity - total_used;
    InventoryEntry {
        stock_ratio: stock_ratio(current_stock, lot.initial_quantity),
        stock_alert: stock_alert(&lot, current_stock),
        total_used,
        current_stock,
        lot,
    }
}

/// Join every lot with the usage totals for its (product, lot).
pub fn compute_inventory(lots: Vec<LotSnapshot>, usage: &UsageTotals) -> Vec<InventoryEntry> {
    lots.into_iter()
        .map(|lot| {
            let used = usage.total_for(&lot.key.usage_key());
            compute_entry(lot, used)
        })
        .collect()
}

/// Full recomputation pass: registrations + usages -> inventory.
pub fn build_inventory(
    registrations: &[RegistrationRecord],
    usages: &[UsageRecord],
) -> Vec<InventoryEntry> {
    compute_inventory(aggregate_lots(registrations), &aggregate_usage(usages))
}

/// Stock available to a usage entry for (product, lot); `None` if no such lot exists.
///
/// Usage entries carry no catalog number, so when the same product/lot pair
/// exists under several catalog numbers their quantities are pooled.
pub fn available_stock(entries: &[InventoryEntry], key: &UsageKey) -> Option<f64> {
    let matching: Vec<&InventoryEntry> = entries
        .iter()
        .filter(|e| e.lot.key.product == key.product && e.lot.key.lot_number == key.lot_number)
        .collect();

    let first = matching.first()?;
    Some(canonical_sum(matching.iter().map(|e| e.lot.initial_quantity)) - first.total_used)
}
