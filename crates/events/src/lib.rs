//! Inventory log records.
//!
//! Two append-only logs feed the inventory: lot registrations and usages. This
//! crate defines their typed records, the column layout of the stores that hold
//! them, and the positional row encoding used when appending.

pub mod event;
pub mod registration;
pub mod row;
pub mod schema;
pub mod usage;

pub use event::Event;
pub use registration::RegistrationRecord;
pub use row::{DATE_FORMAT, Row, TIMESTAMP_FORMAT, cell_text, row_from};
pub use usage::UsageRecord;
