//! Admission control for usage entries.
//!
//! The guard is a pure predicate: accepting a usage does not record it. The
//! caller appends to the usage store after an `Ok`, and must pass a
//! `current_stock` recomputed from freshly read stores.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use labstock_core::{DomainError, DomainResult, UsageKey};
use labstock_events::UsageRecord;

/// A usage entry submitted by an operator, not yet admitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedUsage {
    pub product: String,
    pub lot_number: String,
    pub quantity: f64,
    pub user: String,
    pub note: String,
    pub used_at: NaiveDateTime,
}

impl ProposedUsage {
    pub fn key(&self) -> UsageKey {
        UsageKey::new(self.product.trim(), self.lot_number.trim())
    }

    /// The record to append once the guard accepted this usage.
    pub fn into_record(self) -> UsageRecord {
        UsageRecord {
            used_at: Some(self.used_at),
            product: self.product.trim().to_string(),
            lot_number: self.lot_number.trim().to_string(),
            quantity: self.quantity,
            user: self.user.trim().to_string(),
            note: self.note,
        }
    }
}

/// Check the parts of a proposed usage that do not depend on stock.
///
/// - `InvalidQuantity` when the quantity is not a positive finite number
/// - `MissingField` when product, lot or user is blank
pub fn check_entry(proposal: &ProposedUsage) -> DomainResult<()> {
    if !proposal.quantity.is_finite() || proposal.quantity <= 0.0 {
        return Err(DomainError::InvalidQuantity(proposal.quantity));
    }
    if proposal.product.trim().is_empty() {
        return Err(DomainError::MissingField("product"));
    }
    if proposal.lot_number.trim().is_empty() {
        return Err(DomainError::MissingField("lot_number"));
    }
    if proposal.user.trim().is_empty() {
        return Err(DomainError::MissingField("user"));
    }
    Ok(())
}

/// Check a proposed usage against the lot's current stock.
///
/// Runs [`check_entry`], then rejects with `InsufficientStock` when the quantity
/// exceeds `current_stock`, carrying the exact shortfall `quantity - current_stock`.
pub fn validate_usage(proposal: &ProposedUsage, current_stock: f64) -> DomainResult<()> {
    check_entry(proposal)?;
    if proposal.quantity > current_stock {
        return Err(DomainError::insufficient_stock(proposal.quantity, current_stock));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn proposal(quantity: f64) -> ProposedUsage {
        ProposedUsage {
            product: "DMEM".to_string(),
            lot_number: "LX".to_string(),
            quantity,
            user: "lee".to_string(),
            note: String::new(),
            used_at: NaiveDate::from_ymd_opt(2026, 10, 18)
                .and_then(|d| d.and_hms_opt(10, 0, 0))
                .unwrap(),
        }
    }

    #[test]
    fn accepts_usage_of_exact_remaining_stock() {
        assert_eq!(validate_usage(&proposal(120.0), 120.0), Ok(()));
    }

    #[test]
    fn rejects_over_consumption_with_exact_shortfall() {
        let err = validate_usage(&proposal(130.0), 120.0).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                requested: 130.0,
                available: 120.0,
                shortfall: 10.0,
            }
        );
    }

    #[test]
    fn rejects_non_positive_quantities() {
        for q in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                validate_usage(&proposal(q), 1000.0),
                Err(DomainError::InvalidQuantity(_))
            ));
        }
    }

    #[test]
    fn rejects_blank_required_fields() {
        let mut p = proposal(1.0);
        p.user = "  ".to_string();
        assert_eq!(validate_usage(&p, 10.0), Err(DomainError::MissingField("user")));

        let mut p = proposal(1.0);
        p.lot_number.clear();
        assert_eq!(validate_usage(&p, 10.0), Err(DomainError::MissingField("lot_number")));

        let mut p = proposal(1.0);
        p.product.clear();
        assert_eq!(validate_usage(&p, 10.0), Err(DomainError::MissingField("product")));
    }

    #[test]
    fn accepted_usage_becomes_trimmed_record() {
        let mut p = proposal(3.0);
        p.product = " DMEM ".to_string();
        let rec = p.into_record();
        assert_eq!(rec.product, "DMEM");
        assert_eq!(rec.quantity, 3.0);
        assert!(rec.used_at.is_some());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any quantity above current stock is rejected with shortfall
        /// exactly `quantity - current_stock`; anything else positive is accepted.
        #[test]
        fn guard_never_admits_more_than_stock(
            stock in 0.0f64..10_000.0,
            quantity in 0.001f64..20_000.0,
        ) {
            match validate_usage(&proposal(quantity), stock) {
                Ok(()) => prop_assert!(quantity <= stock),
                Err(err) => {
                    prop_assert!(quantity > stock);
                    prop_assert_eq!(err.shortfall(), Some(quantity - stock));
                }
            }
        }
    }
}
