//! Inventory ledger core.
//!
//! Turns the registration and usage logs into current stock per lot, decides
//! whether a usage may be recorded, and classifies lots into alerts. Everything
//! here is deterministic domain logic (no IO, no storage, no clock).

pub mod alert;
pub mod guard;
pub mod lot;
pub mod normalize;
pub mod registration;
pub mod stock;
pub mod usage;

pub use alert::{
    AlertCategory, AlertConfig, AlertReport, DEFAULT_EXPIRY_THRESHOLD_DAYS, categories, classify,
};
pub use guard::{ProposedUsage, check_entry, validate_usage};
pub use lot::{LotSnapshot, aggregate_lots, lots_for_product, products};
pub use normalize::{
    NormalizeOptions, SchemaError, StoreKind, normalize_registrations, normalize_usages,
};
pub use registration::RegisterLot;
pub use stock::{
    InventoryEntry, StockAlert, available_stock, build_inventory, compute_entry, compute_inventory,
};
pub use usage::{UsageTotals, aggregate_usage};
