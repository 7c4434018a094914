use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use labstock_core::{DomainError, DomainResult};
use labstock_events::RegistrationRecord;

/// Command: register a lot, or another shipment of an already registered lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterLot {
    pub product: String,
    pub manufacturer: String,
    pub catalog_number: String,
    pub lot_number: String,
    pub initial_quantity: f64,
    pub unit: String,
    pub expiry: Option<NaiveDate>,
    pub location: String,
    pub registrant: String,
    /// `None` applies the configured default threshold.
    pub alert_threshold: Option<f64>,
    pub registered_at: NaiveDateTime,
}

fn required(value: &str, field: &'static str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(value.to_string())
}

impl RegisterLot {
    /// Validate the command and build the record to append.
    pub fn into_record(self, default_alert_threshold: f64) -> DomainResult<RegistrationRecord> {
        let product = required(&self.product, "product")?;
        let catalog_number = required(&self.catalog_number, "catalog_number")?;
        let lot_number = required(&self.lot_number, "lot_number")?;
        let registrant = required(&self.registrant, "registrant")?;

        if !self.initial_quantity.is_finite() || self.initial_quantity <= 0.0 {
            return Err(DomainError::InvalidQuantity(self.initial_quantity));
        }

        let alert_threshold = self.alert_threshold.unwrap_or(default_alert_threshold);
        if !alert_threshold.is_finite() || alert_threshold < 0.0 {
            return Err(DomainError::validation(
                "alert threshold must be a non-negative number",
            ));
        }

        Ok(RegistrationRecord {
            product,
            manufacturer: self.manufacturer.trim().to_string(),
            catalog_number,
            lot_number,
            initial_quantity: self.initial_quantity,
            unit: self.unit.trim().to_string(),
            expiry: self.expiry,
            location: self.location.trim().to_string(),
            registered_at: Some(self.registered_at),
            registrant,
            alert_threshold,
            muted: false,
        })
    }
}
