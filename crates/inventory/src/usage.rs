use std::collections::BTreeMap;

use labstock_core::{UsageKey, canonical_sum};
use labstock_events::UsageRecord;

/// Total consumption per (product, lot).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageTotals {
    totals: BTreeMap<UsageKey, f64>,
}

impl UsageTotals {
    /// Total used for a key; 0 for a lot that was never used.
    pub fn total_for(&self, key: &UsageKey) -> f64 {
        self.totals.get(key).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Sum usage quantities per (product, lot).
pub fn aggregate_usage(records: &[UsageRecord]) -> UsageTotals {
    let mut groups: BTreeMap<UsageKey, Vec<f64>> = BTreeMap::new();
    for record in records {
        groups.entry(record.key()).or_default().push(record.quantity);
    }

    UsageTotals {
        totals: groups
            .into_iter()
            .map(|(key, quantities)| (key, canonical_sum(quantities)))
            .collect(),
    }
}
