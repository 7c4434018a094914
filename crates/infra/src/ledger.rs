//! Inventory ledger service (application-level orchestration).
//!
//! Composes the two record stores with the pure inventory core. Every read is
//! a full recomputation from both logs; nothing derived is ever written back.
//!
//! ## Usage submission flow
//!
//! ```text
//! ProposedUsage
//!   ↓
//! 1. Check quantity + required fields (no IO)
//!   ↓
//! 2. Refresh and re-read both stores
//!   ↓
//! 3. Recompute inventory, look up available stock for (product, lot)
//!   ↓
//! 4. Admission guard: quantity <= available
//!   ↓
//! 5. Append to the usage store
//! ```
//!
//! Steps 2 to 5 are not atomic across processes: two operators submitting against
//! the same lot at the same moment can both pass step 4. Re-reading right
//! before the check keeps that window small; it does not close it.

use chrono::NaiveDate;
use thiserror::Error;

use labstock_core::{DomainError, LotKey};
use labstock_events::schema::{mute_flag_text, registration as reg_cols};
use labstock_events::{Event, RegistrationRecord, UsageRecord};
use labstock_inventory::{
    AlertConfig, AlertReport, InventoryEntry, LotSnapshot, NormalizeOptions, ProposedUsage,
    RegisterLot, SchemaError, aggregate_lots, available_stock, build_inventory, classify,
    guard, lots_for_product, normalize_registrations, normalize_usages, products,
};

use crate::config::LedgerConfig;
use crate::store::{RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("rejected: {0}")]
    Rejected(#[from] DomainError),
}

impl LedgerError {
    /// The domain rejection behind this error, if any.
    pub fn rejection(&self) -> Option<&DomainError> {
        match self {
            Self::Rejected(e) => Some(e),
            _ => None,
        }
    }
}

/// Result of an inventory read.
///
/// When either store fails its schema check the entries are empty (never a
/// partial view) and the failures are listed in `schema_errors`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryView {
    pub entries: Vec<InventoryEntry>,
    pub schema_errors: Vec<SchemaError>,
}

impl InventoryView {
    pub fn is_complete(&self) -> bool {
        self.schema_errors.is_empty()
    }

    pub fn entry(&self, key: &LotKey) -> Option<&InventoryEntry> {
        self.entries.iter().find(|e| e.key() == key)
    }
}

/// Turn a schema failure into "no records", remembering it; pass other errors through.
fn split_schema_error<T>(
    result: Result<T, LedgerError>,
    schema_errors: &mut Vec<SchemaError>,
) -> Result<Option<T>, LedgerError> {
    match result {
        Ok(records) => Ok(Some(records)),
        Err(LedgerError::Schema(e)) => {
            tracing::warn!(error = %e, "inventory read aborted");
            schema_errors.push(e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Inventory ledger over a registration store and a usage store.
#[derive(Debug)]
pub struct InventoryLedger<R, U> {
    registrations: R,
    usages: U,
    config: LedgerConfig,
}

impl<R, U> InventoryLedger<R, U>
where
    R: RecordStore,
    U: RecordStore,
{
    pub fn new(registrations: R, usages: U, config: LedgerConfig) -> Self {
        Self {
            registrations,
            usages,
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn into_parts(self) -> (R, U) {
        (self.registrations, self.usages)
    }

    fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            default_alert_threshold: self.config.default_alert_threshold,
        }
    }

    fn load_registrations(&self) -> Result<Vec<RegistrationRecord>, LedgerError> {
        let rows = self.registrations.read_all()?;
        Ok(normalize_registrations(&rows, &self.normalize_options())?)
    }

    fn load_usages(&self) -> Result<Vec<UsageRecord>, LedgerError> {
        let rows = self.usages.read_all()?;
        Ok(normalize_usages(&rows)?)
    }

    fn load_lots(&self) -> Result<Vec<LotSnapshot>, LedgerError> {
        Ok(aggregate_lots(&self.load_registrations()?))
    }

    /// Recompute current stock for every lot.
    ///
    /// Store failures abort the read. Schema failures are logged once and
    /// reported in the view alongside an empty entry list.
    pub fn inventory(&self) -> Result<InventoryView, LedgerError> {
        let registrations = self.load_registrations();
        let usages = self.load_usages();

        let mut schema_errors = Vec::new();
        let registrations = split_schema_error(registrations, &mut schema_errors)?;
        let usages = split_schema_error(usages, &mut schema_errors)?;

        let entries = match (registrations, usages) {
            (Some(regs), Some(uses)) => {
                let entries = build_inventory(&regs, &uses);
                tracing::debug!(
                    registrations = regs.len(),
                    usages = uses.len(),
                    lots = entries.len(),
                    "inventory recomputed"
                );
                entries
            }
            _ => Vec::new(),
        };

        Ok(InventoryView {
            entries,
            schema_errors,
        })
    }

    /// Classify the current inventory as of `today`.
    ///
    /// Unlike [`inventory`](Self::inventory), a schema failure is an error here:
    /// an empty entry list would read as "no alerts".
    pub fn alerts(&self, today: NaiveDate) -> Result<AlertReport, LedgerError> {
        let mut view = self.inventory()?;
        if !view.schema_errors.is_empty() {
            return Err(view.schema_errors.swap_remove(0).into());
        }
        let config = AlertConfig::new(today).with_threshold_days(self.config.expiry_threshold_days);
        Ok(classify(&view.entries, &config))
    }

    /// Registered product names, sorted.
    pub fn products(&self) -> Result<Vec<String>, LedgerError> {
        Ok(products(&self.load_lots()?))
    }

    /// Lot numbers registered for a product, sorted. Surrounding whitespace is ignored.
    pub fn lots_for_product(&self, product: &str) -> Result<Vec<String>, LedgerError> {
        Ok(lots_for_product(&self.load_lots()?, product.trim()))
    }

    /// Validate and append a registration row.
    pub fn register_lot(&self, command: RegisterLot) -> Result<RegistrationRecord, LedgerError> {
        let record = command.into_record(self.config.default_alert_threshold)?;
        self.registrations.append(record.to_row())?;

        tracing::info!(
            event_type = record.event_type(),
            version = record.version(),
            lot = %record.key(),
            quantity = record.initial_quantity,
            registrant = %record.registrant,
            "lot registered"
        );
        Ok(record)
    }

    /// Admit and append a usage row, checked against freshly recomputed stock.
    pub fn record_usage(&self, proposal: ProposedUsage) -> Result<UsageRecord, LedgerError> {
        guard::check_entry(&proposal)?;

        self.registrations.refresh();
        self.usages.refresh();
        let entries = build_inventory(&self.load_registrations()?, &self.load_usages()?);

        let key = proposal.key();
        let available = available_stock(&entries, &key)
            .ok_or_else(|| DomainError::not_found(format!("lot {key}")))?;

        if let Err(rejection) = guard::validate_usage(&proposal, available) {
            tracing::info!(lot = %key, error = %rejection, "usage rejected");
            return Err(rejection.into());
        }

        let record = proposal.into_record();
        self.usages.append(record.to_row())?;

        tracing::info!(
            event_type = record.event_type(),
            version = record.version(),
            lot = %key,
            quantity = record.quantity,
            remaining = available - record.quantity,
            user = %record.user,
            "usage recorded"
        );
        Ok(record)
    }

    /// Mute alerts for every registration row of a lot. Returns rows updated.
    pub fn mute_lot(&self, key: &LotKey) -> Result<usize, LedgerError> {
        self.set_muted(key, true)
    }

    /// Reverse a mute.
    pub fn unmute_lot(&self, key: &LotKey) -> Result<usize, LedgerError> {
        self.set_muted(key, false)
    }

    fn set_muted(&self, key: &LotKey, muted: bool) -> Result<usize, LedgerError> {
        // Stored cells are read back trimmed.
        let key = &LotKey::new(
            key.product.trim(),
            key.catalog_number.trim(),
            key.lot_number.trim(),
        );
        self.registrations.refresh();
        let records = self.load_registrations()?;

        let rows: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.matches(key))
            .map(|(i, _)| i)
            .collect();

        if rows.is_empty() {
            return Err(DomainError::not_found(format!("lot {key}")).into());
        }

        for &row_index in &rows {
            self.registrations.update_cell(
                row_index,
                reg_cols::MUTED_INDEX,
                serde_json::json!(mute_flag_text(muted)),
            )?;
        }

        tracing::info!(lot = %key, muted, rows = rows.len(), "mute flag written");
        Ok(rows.len())
    }
}
