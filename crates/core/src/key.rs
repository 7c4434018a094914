//! Lot identity keys.
//!
//! A lot is identified by product name + catalog number + lot number. Usage
//! entries do not carry a catalog number, so consumption is keyed by
//! product name + lot number only.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Aggregation key for registrations: (product, catalog number, lot number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LotKey {
    pub product: String,
    pub catalog_number: String,
    pub lot_number: String,
}

impl LotKey {
    pub fn new(
        product: impl Into<String>,
        catalog_number: impl Into<String>,
        lot_number: impl Into<String>,
    ) -> Self {
        Self {
            product: product.into(),
            catalog_number: catalog_number.into(),
            lot_number: lot_number.into(),
        }
    }

    /// The consumption key this lot is charged under.
    pub fn usage_key(&self) -> UsageKey {
        UsageKey::new(self.product.clone(), self.lot_number.clone())
    }
}

impl core::fmt::Display for LotKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} (Cat. {}, Lot {})",
            self.product, self.catalog_number, self.lot_number
        )
    }
}

impl ValueObject for LotKey {}

/// Aggregation key for usages: (product, lot number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UsageKey {
    pub product: String,
    pub lot_number: String,
}

impl UsageKey {
    pub fn new(product: impl Into<String>, lot_number: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            lot_number: lot_number.into(),
        }
    }
}

impl core::fmt::Display for UsageKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (Lot {})", self.product, self.lot_number)
    }
}

impl ValueObject for UsageKey {}
