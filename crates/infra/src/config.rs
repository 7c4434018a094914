//! Configuration loading and representation.

use serde::{Deserialize, Serialize};

use labstock_inventory::DEFAULT_EXPIRY_THRESHOLD_DAYS;

use crate::store::SheetRef;

pub const ENV_REGISTRATION_DOCUMENT: &str = "LABSTOCK_REGISTRATION_DOCUMENT";
pub const ENV_REGISTRATION_TAB: &str = "LABSTOCK_REGISTRATION_TAB";
pub const ENV_USAGE_DOCUMENT: &str = "LABSTOCK_USAGE_DOCUMENT";
pub const ENV_USAGE_TAB: &str = "LABSTOCK_USAGE_TAB";
pub const ENV_EXPIRY_THRESHOLD_DAYS: &str = "LABSTOCK_EXPIRY_THRESHOLD_DAYS";
pub const ENV_DEFAULT_ALERT_THRESHOLD: &str = "LABSTOCK_DEFAULT_ALERT_THRESHOLD";

/// Ledger configuration: where the two stores live and the alert policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub registration_sheet: SheetRef,
    pub usage_sheet: SheetRef,
    pub expiry_threshold_days: u32,
    /// Threshold applied to registrations that do not set one.
    pub default_alert_threshold: f64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            registration_sheet: SheetRef::new("Reagent_DB", "Master"),
            usage_sheet: SheetRef::new("Usage_Log", "Log"),
            expiry_threshold_days: DEFAULT_EXPIRY_THRESHOLD_DAYS,
            default_alert_threshold: 0.0,
        }
    }
}

impl LedgerConfig {
    /// Read overrides from `LABSTOCK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep defaults, bad values are
    /// logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup(ENV_REGISTRATION_DOCUMENT) {
            config.registration_sheet.document = v;
        }
        if let Some(v) = lookup(ENV_REGISTRATION_TAB) {
            config.registration_sheet.tab = v;
        }
        if let Some(v) = lookup(ENV_USAGE_DOCUMENT) {
            config.usage_sheet.document = v;
        }
        if let Some(v) = lookup(ENV_USAGE_TAB) {
            config.usage_sheet.tab = v;
        }

        if let Some(v) = lookup(ENV_EXPIRY_THRESHOLD_DAYS) {
            match v.trim().parse::<u32>() {
                Ok(days) => config.expiry_threshold_days = days,
                Err(_) => tracing::warn!(
                    value = %v,
                    "{ENV_EXPIRY_THRESHOLD_DAYS} is not a day count; using default"
                ),
            }
        }

        if let Some(v) = lookup(ENV_DEFAULT_ALERT_THRESHOLD) {
            match v.trim().parse::<f64>() {
                Ok(q) if q.is_finite() && q >= 0.0 => config.default_alert_threshold = q,
                _ => tracing::warn!(
                    value = %v,
                    "{ENV_DEFAULT_ALERT_THRESHOLD} is not a non-negative quantity; using default"
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_lab_sheets() {
        let config = LedgerConfig::from_lookup(lookup(&[]));
        assert_eq!(config.registration_sheet, SheetRef::new("Reagent_DB", "Master"));
        assert_eq!(config.usage_sheet, SheetRef::new("Usage_Log", "Log"));
        assert_eq!(config.expiry_threshold_days, 30);
        assert_eq!(config.default_alert_threshold, 0.0);
    }

    #[test]
    fn overrides_are_applied() {
        let config = LedgerConfig::from_lookup(lookup(&[
            (ENV_USAGE_TAB, "Log2"),
            (ENV_EXPIRY_THRESHOLD_DAYS, "14"),
            (ENV_DEFAULT_ALERT_THRESHOLD, "2.5"),
        ]));
        assert_eq!(config.usage_sheet.tab, "Log2");
        assert_eq!(config.expiry_threshold_days, 14);
        assert_eq!(config.default_alert_threshold, 2.5);
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let config = LedgerConfig::from_lookup(lookup(&[
            (ENV_EXPIRY_THRESHOLD_DAYS, "a month"),
            (ENV_DEFAULT_ALERT_THRESHOLD, "-3"),
        ]));
        assert_eq!(config.expiry_threshold_days, 30);
        assert_eq!(config.default_alert_threshold, 0.0);
    }

    #[test]
    fn partial_json_config_fills_defaults() {
        let config: LedgerConfig =
            serde_json::from_str(r#"{ "expiry_threshold_days": 7 }"#).unwrap();
        assert_eq!(config.expiry_threshold_days, 7);
        assert_eq!(config.usage_sheet, SheetRef::new("Usage_Log", "Log"));
    }
}
