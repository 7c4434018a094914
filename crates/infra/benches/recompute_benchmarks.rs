use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use labstock_events::{Event, RegistrationRecord, UsageRecord};
use labstock_events::schema::{registration as reg_cols, usage as use_cols};
use labstock_infra::{InMemoryWorkbook, InventoryLedger, LedgerConfig, RecordStore};
use labstock_inventory::build_inventory;
use std::sync::Arc;

const LOTS: usize = 50;

fn registrations(count: usize) -> Vec<RegistrationRecord> {
    (0..count)
        .map(|i| RegistrationRecord {
            product: format!("reagent-{}", i % LOTS),
            manufacturer: "Sigma".to_string(),
            catalog_number: format!("C{}", i % LOTS),
            lot_number: format!("L{}", i % LOTS),
            initial_quantity: 100.0 + (i % 7) as f64,
            unit: "mL".to_string(),
            expiry: NaiveDate::from_ymd_opt(2027, 1, 1),
            location: "A-1".to_string(),
            registered_at: NaiveDate::from_ymd_opt(2026, 1, 1)
                .and_then(|d| d.and_hms_opt((i % 24) as u32, 0, 0)),
            registrant: "kim".to_string(),
            alert_threshold: 10.0,
            muted: false,
        })
        .collect()
}

fn usages(count: usize) -> Vec<UsageRecord> {
    (0..count)
        .map(|i| UsageRecord {
            used_at: None,
            product: format!("reagent-{}", i % LOTS),
            lot_number: format!("L{}", i % LOTS),
            quantity: 0.5,
            user: "lee".to_string(),
            note: String::new(),
        })
        .collect()
}

/// Pure recomputation over typed records.
fn bench_build_inventory(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_inventory");

    for size in [100usize, 1_000, 10_000] {
        let regs = registrations(size / 10);
        let uses = usages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(build_inventory(black_box(&regs), black_box(&uses))))
        });
    }

    group.finish();
}

/// Full read path: raw rows -> normalize -> aggregate -> stock.
fn bench_ledger_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger_inventory_read");

    for size in [1_000usize, 10_000] {
        let config = LedgerConfig::default();
        let workbook = Arc::new(InMemoryWorkbook::new());
        workbook
            .create_sheet(&config.registration_sheet, &reg_cols::COLUMNS)
            .expect("create registration sheet");
        workbook
            .create_sheet(&config.usage_sheet, &use_cols::COLUMNS)
            .expect("create usage sheet");

        let reg_store = workbook.open(config.registration_sheet.clone());
        let use_store = workbook.open(config.usage_sheet.clone());
        for r in registrations(size / 10) {
            reg_store.append(r.to_row()).expect("append registration");
        }
        for u in usages(size) {
            use_store.append(u.to_row()).expect("append usage");
        }

        let ledger = InventoryLedger::new(reg_store, use_store, config);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(ledger.inventory().expect("inventory read")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_inventory, bench_ledger_read);
criterion_main!(benches);
