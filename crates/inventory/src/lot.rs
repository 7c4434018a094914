use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use labstock_core::{Entity, LotKey, canonical_sum};
use labstock_events::RegistrationRecord;

/// One lot as the sum of all its registrations.
///
/// `initial_quantity` is the total over every registration of the key; every
/// other field is taken from the most recent registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotSnapshot {
    pub key: LotKey,
    pub manufacturer: String,
    pub unit: String,
    pub location: String,
    pub expiry: Option<NaiveDate>,
    pub alert_threshold: f64,
    pub muted: bool,
    pub initial_quantity: f64,
    pub last_registered_at: Option<NaiveDateTime>,
    pub last_registrant: String,
    /// Number of registration rows merged into this snapshot.
    pub registrations: usize,
}

impl Entity for LotSnapshot {
    type Id = LotKey;

    fn id(&self) -> &Self::Id {
        &self.key
    }
}

/// Merge order within a group: oldest first, unparsable timestamps before all.
///
/// Equal timestamps fall back to comparing the remaining fields, so the winner
/// never depends on the order rows were read in.
fn merge_order(a: &RegistrationRecord, b: &RegistrationRecord) -> Ordering {
    a.registered_at
        .cmp(&b.registered_at)
        .then_with(|| a.registrant.cmp(&b.registrant))
        .then_with(|| a.manufacturer.cmp(&b.manufacturer))
        .then_with(|| a.unit.cmp(&b.unit))
        .then_with(|| a.location.cmp(&b.location))
        .then_with(|| a.expiry.cmp(&b.expiry))
        .then_with(|| a.alert_threshold.total_cmp(&b.alert_threshold))
        .then_with(|| a.muted.cmp(&b.muted))
        .then_with(|| a.initial_quantity.total_cmp(&b.initial_quantity))
}

fn merge_group(key: LotKey, mut group: Vec<&RegistrationRecord>) -> Option<LotSnapshot> {
    group.sort_by(|a, b| merge_order(a, b));
    let latest = *group.last()?;

    Some(LotSnapshot {
        key,
        manufacturer: latest.manufacturer.clone(),
        unit: latest.unit.clone(),
        location: latest.location.clone(),
        expiry: latest.expiry,
        alert_threshold: latest.alert_threshold,
        muted: latest.muted,
        initial_quantity: canonical_sum(group.iter().map(|r| r.initial_quantity)),
        last_registered_at: latest.registered_at,
        last_registrant: latest.registrant.clone(),
        registrations: group.len(),
    })
}

/// Consolidate registrations into one snapshot per (product, catalog, lot).
///
/// Output is ordered by lot key.
pub fn aggregate_lots(records: &[RegistrationRecord]) -> Vec<LotSnapshot> {
    let mut groups: BTreeMap<LotKey, Vec<&RegistrationRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.key()).or_default().push(record);
    }

    groups
        .into_iter()
        .filter_map(|(key, group)| merge_group(key, group))
        .collect()
}

/// Distinct product names, sorted.
pub fn products(lots: &[LotSnapshot]) -> Vec<String> {
    let mut names: Vec<String> = lots
        .iter()
        .map(|l| l.key.product.clone())
        .filter(|p| !p.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Distinct lot numbers registered for one product, sorted.
pub fn lots_for_product(lots: &[LotSnapshot], product: &str) -> Vec<String> {
    let mut numbers: Vec<String> = lots
        .iter()
        .filter(|l| l.key.product == product)
        .map(|l| l.key.lot_number.clone())
        .filter(|n| !n.is_empty())
        .collect();
    numbers.sort();
    numbers.dedup();
    numbers
}
