//! Alert classification.
//!
//! Categories overlap (a lot can be both expiring and low on stock), except
//! that muted lots are reported only as muted and lots with no triggered
//! category are reported as ok.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::stock::InventoryEntry;

pub const DEFAULT_EXPIRY_THRESHOLD_DAYS: u32 = 30;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConfig {
    pub today: NaiveDate,
    /// Lots expiring within this many days (inclusive) are "expiring soon".
    pub expiry_threshold_days: u32,
}

impl AlertConfig {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            expiry_threshold_days: DEFAULT_EXPIRY_THRESHOLD_DAYS,
        }
    }

    pub fn with_threshold_days(mut self, days: u32) -> Self {
        self.expiry_threshold_days = days;
        self
    }

    fn horizon(&self) -> NaiveDate {
        self.today
            .checked_add_days(Days::new(u64::from(self.expiry_threshold_days)))
            .unwrap_or(NaiveDate::MAX)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    ExpiringSoon,
    Expired,
    LowStock,
    OutOfStock,
}

/// Categories triggered by one entry; always empty for a muted lot.
pub fn categories(entry: &InventoryEntry, config: &AlertConfig) -> Vec<AlertCategory> {
    if entry.is_muted() {
        return Vec::new();
    }

    let mut out = Vec::new();
    let stock = entry.current_stock;

    if stock > 0.0 {
        if let Some(expiry) = entry.lot.expiry {
            if expiry < config.today {
                out.push(AlertCategory::Expired);
            } else if expiry <= config.horizon() {
                out.push(AlertCategory::ExpiringSoon);
            }
        }
        if stock <= entry.lot.alert_threshold {
            out.push(AlertCategory::LowStock);
        }
    } else {
        out.push(AlertCategory::OutOfStock);
    }

    out
}

/// Inventory partitioned by alert category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertReport {
    pub expiring_soon: Vec<InventoryEntry>,
    pub expired: Vec<InventoryEntry>,
    pub low_stock: Vec<InventoryEntry>,
    pub out_of_stock: Vec<InventoryEntry>,
    pub muted: Vec<InventoryEntry>,
    pub ok: Vec<InventoryEntry>,
}

impl AlertReport {
    /// Number of entries needing attention (counted once per category).
    pub fn alert_count(&self) -> usize {
        self.expiring_soon.len()
            + self.expired.len()
            + self.low_stock.len()
            + self.out_of_stock.len()
    }
}

pub fn classify(entries: &[InventoryEntry], config: &AlertConfig) -> AlertReport {
    let mut report = AlertReport::default();

    for entry in entries {
        if entry.is_muted() {
            report.muted.push(entry.clone());
            continue;
        }

        let triggered = categories(entry, config);
        if triggered.is_empty() {
            report.ok.push(entry.clone());
        }
        for category in triggered {
            let bucket = match category {
                AlertCategory::ExpiringSoon => &mut report.expiring_soon,
                AlertCategory::Expired => &mut report.expired,
                AlertCategory::LowStock => &mut report.low_stock,
                AlertCategory::OutOfStock => &mut report.out_of_stock,
            };
            bucket.push(entry.clone());
        }
    }

    report
}
