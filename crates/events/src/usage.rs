use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

use labstock_core::UsageKey;

use crate::event::Event;
use crate::row::TIMESTAMP_FORMAT;

/// Record: some quantity of a lot was consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub used_at: Option<NaiveDateTime>,
    pub product: String,
    pub lot_number: String,
    pub quantity: f64,
    pub user: String,
    pub note: String,
}

impl UsageRecord {
    pub fn key(&self) -> UsageKey {
        UsageKey::new(self.product.clone(), self.lot_number.clone())
    }
}

impl Event for UsageRecord {
    fn event_type(&self) -> &'static str {
        "inventory.lot.used"
    }

    fn version(&self) -> u32 {
        1
    }

    fn to_row(&self) -> Vec<JsonValue> {
        vec![
            json!(
                self.used_at
                    .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
                    .unwrap_or_default()
            ),
            json!(self.product),
            json!(self.lot_number),
            json!(self.quantity),
            json!(self.user),
            json!(self.note),
        ]
    }
}
