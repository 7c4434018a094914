use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

use labstock_core::LotKey;

use crate::event::Event;
use crate::row::{DATE_FORMAT, TIMESTAMP_FORMAT};
use crate::schema::mute_flag_text;

/// Record: a lot (or an additional shipment of a lot) was registered.
///
/// Re-registering the same (product, catalog number, lot) adds quantity; the
/// newest row's metadata wins when the lot is aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub product: String,
    pub manufacturer: String,
    pub catalog_number: String,
    pub lot_number: String,
    /// Non-negative; malformed stored values read as 0.
    pub initial_quantity: f64,
    pub unit: String,
    pub expiry: Option<NaiveDate>,
    pub location: String,
    /// `None` when the stored timestamp could not be parsed.
    pub registered_at: Option<NaiveDateTime>,
    pub registrant: String,
    /// Absolute quantity at or below which the lot counts as low on stock.
    pub alert_threshold: f64,
    pub muted: bool,
}

impl RegistrationRecord {
    pub fn key(&self) -> LotKey {
        LotKey::new(
            self.product.clone(),
            self.catalog_number.clone(),
            self.lot_number.clone(),
        )
    }

    /// Whether this row belongs to the given lot.
    pub fn matches(&self, key: &LotKey) -> bool {
        self.product == key.product
            && self.catalog_number == key.catalog_number
            && self.lot_number == key.lot_number
    }
}

impl Event for RegistrationRecord {
    fn event_type(&self) -> &'static str {
        "inventory.lot.registered"
    }

    fn version(&self) -> u32 {
        2
    }

    fn to_row(&self) -> Vec<JsonValue> {
        vec![
            json!(self.product),
            json!(self.manufacturer),
            json!(self.catalog_number),
            json!(self.lot_number),
            json!(self.initial_quantity),
            json!(self.unit),
            json!(
                self.expiry
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_default()
            ),
            json!(self.location),
            json!(
                self.registered_at
                    .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
                    .unwrap_or_default()
            ),
            json!(self.registrant),
            json!(self.alert_threshold),
            json!(mute_flag_text(self.muted)),
        ]
    }
}
