//! Integration tests for the full ledger pipeline.
//!
//! Tests: Store rows → Normalizer → Aggregators → Stock → Guard / Alerts
//!
//! Verifies:
//! - Repeated registrations and usages produce the right stock
//! - The guard reads fresh data and reports exact shortfalls
//! - Schema and store failures surface instead of partial data
//! - Mute write-back suppresses alerts

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, NaiveDateTime};
    use serde_json::json;

    use labstock_core::{DomainError, LotKey};
    use labstock_events::schema::{registration as reg_cols, usage as use_cols};
    use labstock_inventory::{ProposedUsage, RegisterLot, StockAlert, StoreKind};

    use crate::config::LedgerConfig;
    use crate::ledger::{InventoryLedger, LedgerError};
    use crate::store::{
        CachingStore, InMemoryWorkbook, RecordStore, SheetRef, SheetStore, StoreError,
    };

    type Ledger = InventoryLedger<CachingStore<SheetStore>, CachingStore<SheetStore>>;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap()
    }

    fn setup() -> (Arc<InMemoryWorkbook>, Ledger) {
        let config = LedgerConfig::default();
        let workbook = Arc::new(InMemoryWorkbook::new());
        workbook
            .create_sheet(&config.registration_sheet, &reg_cols::COLUMNS)
            .unwrap();
        workbook
            .create_sheet(&config.usage_sheet, &use_cols::COLUMNS)
            .unwrap();

        let registrations = CachingStore::new(workbook.open(config.registration_sheet.clone()));
        let usages = CachingStore::new(workbook.open(config.usage_sheet.clone()));
        (workbook, InventoryLedger::new(registrations, usages, config))
    }

    fn register(lot: &str, quantity: f64, day: u32) -> RegisterLot {
        RegisterLot {
            product: "DMEM".to_string(),
            manufacturer: "Gibco".to_string(),
            catalog_number: "11995-065".to_string(),
            lot_number: lot.to_string(),
            initial_quantity: quantity,
            unit: "mL".to_string(),
            expiry: NaiveDate::from_ymd_opt(2027, 10, 18),
            location: "4C fridge A-1".to_string(),
            registrant: "kim".to_string(),
            alert_threshold: Some(10.0),
            registered_at: at(day),
        }
    }

    fn usage(lot: &str, quantity: f64) -> ProposedUsage {
        ProposedUsage {
            product: "DMEM".to_string(),
            lot_number: lot.to_string(),
            quantity,
            user: "lee".to_string(),
            note: "passage".to_string(),
            used_at: at(18),
        }
    }

    fn lx() -> LotKey {
        LotKey::new("DMEM", "11995-065", "LX")
    }

    #[test]
    fn repeated_registration_usage_and_guard_scenario() {
        let (_wb, ledger) = setup();

        ledger.register_lot(register("LX", 100.0, 1)).unwrap();
        ledger.register_lot(register("LX", 50.0, 5)).unwrap();

        let view = ledger.inventory().unwrap();
        assert_eq!(view.entry(&lx()).unwrap().lot.initial_quantity, 150.0);

        ledger.record_usage(usage("LX", 30.0)).unwrap();
        let view = ledger.inventory().unwrap();
        let entry = view.entry(&lx()).unwrap();
        assert_eq!(entry.current_stock, 120.0);
        assert_eq!(entry.stock_ratio, 80.0);

        let err = ledger.record_usage(usage("LX", 130.0)).unwrap_err();
        assert_eq!(err.rejection().and_then(DomainError::shortfall), Some(10.0));

        ledger.record_usage(usage("LX", 120.0)).unwrap();
        let view = ledger.inventory().unwrap();
        let entry = view.entry(&lx()).unwrap();
        assert_eq!(entry.current_stock, 0.0);
        assert_eq!(entry.stock_alert, StockAlert::OutOfStock);

        let report = ledger.alerts(today()).unwrap();
        assert_eq!(report.out_of_stock.len(), 1);
    }

    #[test]
    fn rejected_usage_is_not_appended() {
        let (_wb, ledger) = setup();
        ledger.register_lot(register("LX", 10.0, 1)).unwrap();

        assert!(ledger.record_usage(usage("LX", 11.0)).is_err());
        let (_, usages) = ledger.into_parts();
        assert!(usages.read_all().unwrap().is_empty());
    }

    #[test]
    fn usage_against_unknown_lot_is_not_found() {
        let (_wb, ledger) = setup();
        ledger.register_lot(register("LX", 10.0, 1)).unwrap();

        let err = ledger.record_usage(usage("LZ", 1.0)).unwrap_err();
        assert!(matches!(err.rejection(), Some(DomainError::NotFound(_))));
    }

    #[test]
    fn guard_sees_usage_written_by_another_session() {
        let (workbook, ledger) = setup();
        ledger.register_lot(register("LX", 10.0, 1)).unwrap();
        // Warm this session's cache.
        assert_eq!(ledger.inventory().unwrap().entries[0].current_stock, 10.0);

        let other = workbook.open(LedgerConfig::default().usage_sheet);
        other
            .append(vec![
                json!("2026-10-18 08:00:00"),
                json!("DMEM"),
                json!("LX"),
                json!(8),
                json!("park"),
                json!(""),
            ])
            .unwrap();

        let err = ledger.record_usage(usage("LX", 5.0)).unwrap_err();
        assert_eq!(
            err.rejection(),
            Some(&DomainError::InsufficientStock {
                requested: 5.0,
                available: 2.0,
                shortfall: 3.0,
            })
        );
    }

    #[test]
    fn schema_error_yields_empty_view() {
        let config = LedgerConfig::default();
        let workbook = Arc::new(InMemoryWorkbook::new());
        workbook
            .create_sheet(&config.registration_sheet, &[reg_cols::PRODUCT, reg_cols::LOT_NUMBER])
            .unwrap();
        workbook.create_sheet(&config.usage_sheet, &use_cols::COLUMNS).unwrap();
        let registrations = workbook.open(config.registration_sheet.clone());
        registrations.append(vec![json!("DMEM"), json!("LX")]).unwrap();

        let usages = workbook.open(config.usage_sheet.clone());
        let ledger = InventoryLedger::new(registrations, usages, config);
        let view = ledger.inventory().unwrap();
        assert!(view.entries.is_empty());
        assert!(!view.is_complete());
        assert_eq!(view.schema_errors[0].store, StoreKind::Registration);

        let err = ledger.record_usage(usage("LX", 1.0)).unwrap_err();
        assert!(matches!(err, LedgerError::Schema(_)));
    }

    #[test]
    fn alerts_refuse_to_report_over_a_broken_schema() {
        let config = LedgerConfig::default();
        let workbook = Arc::new(InMemoryWorkbook::new());
        workbook
            .create_sheet(&config.registration_sheet, &reg_cols::COLUMNS)
            .unwrap();
        let usage_columns: Vec<&str> = use_cols::COLUMNS
            .iter()
            .copied()
            .filter(|c| *c != use_cols::QUANTITY)
            .collect();
        workbook
            .create_sheet(&config.usage_sheet, &usage_columns)
            .unwrap();
        let usages = workbook.open(config.usage_sheet.clone());
        usages
            .append(vec![json!("2026-10-18 08:00:00"), json!("DMEM"), json!("LX")])
            .unwrap();

        let ledger = InventoryLedger::new(
            workbook.open(config.registration_sheet.clone()),
            usages,
            config,
        );
        let mut low_and_expiring = register("LX", 5.0, 1);
        low_and_expiring.expiry = NaiveDate::from_ymd_opt(2026, 10, 20);
        ledger.register_lot(low_and_expiring).unwrap();

        match ledger.alerts(today()) {
            Err(LedgerError::Schema(e)) => {
                assert_eq!(e.store, StoreKind::Usage);
                assert_eq!(e.missing, vec![use_cols::QUANTITY.to_string()]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn missing_store_is_unavailable() {
        let workbook = Arc::new(InMemoryWorkbook::new());
        let ledger = InventoryLedger::new(
            workbook.open(SheetRef::new("Reagent_DB", "Master")),
            workbook.open(SheetRef::new("Usage_Log", "Log")),
            LedgerConfig::default(),
        );

        let err = ledger.register_lot(register("LX", 1.0, 1)).unwrap_err();
        match err {
            LedgerError::Store(e) => {
                assert_eq!(e, StoreError::DocumentNotFound("Reagent_DB".to_string()))
            }
            other => panic!("expected store error, got {other:?}"),
        }
        assert!(matches!(ledger.inventory(), Err(LedgerError::Store(_))));
    }

    #[test]
    fn mute_and_unmute_write_back_to_every_row() {
        let (_wb, ledger) = setup();
        ledger.register_lot(register("LX", 5.0, 1)).unwrap();
        ledger.register_lot(register("LX", 3.0, 2)).unwrap();
        ledger.register_lot(register("LY", 100.0, 2)).unwrap();

        assert_eq!(ledger.alerts(today()).unwrap().low_stock.len(), 1);

        assert_eq!(ledger.mute_lot(&lx()).unwrap(), 2);
        let report = ledger.alerts(today()).unwrap();
        assert!(report.low_stock.is_empty());
        assert_eq!(report.muted.len(), 1);
        assert_eq!(report.ok.len(), 1);

        assert_eq!(ledger.unmute_lot(&lx()).unwrap(), 2);
        assert_eq!(ledger.alerts(today()).unwrap().low_stock.len(), 1);

        let padded = LotKey::new(" DMEM ", "11995-065 ", " LX");
        assert_eq!(ledger.mute_lot(&padded).unwrap(), 2);
        assert_eq!(ledger.alerts(today()).unwrap().muted.len(), 1);

        let err = ledger.mute_lot(&LotKey::new("PBS", "x", "y")).unwrap_err();
        assert!(matches!(err.rejection(), Some(DomainError::NotFound(_))));
    }

    #[test]
    fn lookups_list_registered_products_and_lots() {
        let (_wb, ledger) = setup();
        assert!(ledger.products().unwrap().is_empty());

        ledger.register_lot(register("LY", 5.0, 1)).unwrap();
        ledger.register_lot(register("LX", 5.0, 1)).unwrap();
        ledger.register_lot(register("LX", 5.0, 2)).unwrap();

        assert_eq!(ledger.products().unwrap(), vec!["DMEM".to_string()]);
        assert_eq!(
            ledger.lots_for_product("DMEM").unwrap(),
            vec!["LX".to_string(), "LY".to_string()]
        );
        assert_eq!(ledger.lots_for_product(" DMEM ").unwrap().len(), 2);
        assert!(ledger.lots_for_product("PBS").unwrap().is_empty());
    }

    #[test]
    fn invalid_registration_is_not_appended() {
        let (_wb, ledger) = setup();
        let err = ledger.register_lot(register("LX", 0.0, 1)).unwrap_err();
        assert_eq!(err.rejection(), Some(&DomainError::InvalidQuantity(0.0)));
        assert!(ledger.inventory().unwrap().entries.is_empty());
    }

    #[test]
    fn expiring_and_expired_lots_are_reported() {
        let (_wb, ledger) = setup();
        let mut soon = register("LX", 100.0, 1);
        soon.expiry = Some(today());
        let mut past = register("LY", 100.0, 1);
        past.expiry = NaiveDate::from_ymd_opt(2026, 9, 1);
        ledger.register_lot(soon).unwrap();
        ledger.register_lot(past).unwrap();

        let report = ledger.alerts(today()).unwrap();
        assert_eq!(report.expiring_soon.len(), 1);
        assert_eq!(report.expired.len(), 1);
        assert_eq!(report.expired[0].lot.key.lot_number, "LY");
    }
}
