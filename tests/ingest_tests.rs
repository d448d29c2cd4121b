use std::path::Path;

use sales_pivot::ingest::process_rows;
use sales_pivot::sheet::read_rows;
use sales_pivot::{
    Cell, GeoResolver, IngestError, ReferenceStore, SalesAggregator, StatusLevel,
    DEFAULT_WAREHOUSE,
};

fn row(values: &[&str]) -> Vec<Cell> {
    values
        .iter()
        .map(|value| {
            if value.is_empty() {
                Cell::Empty
            } else {
                Cell::text(*value)
            }
        })
        .collect()
}

fn sample_rows() -> Vec<Vec<Cell>> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sales_sample.csv");
    read_rows(&path).expect("fixture should parse")
}

#[test]
fn sample_sheet_is_normalized_and_resolved() {
    let store = ReferenceStore::fallback();
    let outcome = process_rows(&sample_rows(), &GeoResolver::new(&store)).expect("ingest");

    let report = &outcome.report;
    assert_eq!(report.total_rows, 7);
    assert_eq!(report.processed, 5);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.unresolved, 1);
    assert_eq!(report.processed + report.skipped, report.total_rows);

    let records = &outcome.records;
    assert_eq!(records[0].warehouse, "Склад Москва");
    assert_eq!(records[0].quantity, 3.0);
    assert!((records[0].amount - 1200.5).abs() < 1e-9);

    assert_eq!(records[1].city, "г. Казань");
    assert_eq!(records[1].region, "Приволжский");
    assert_eq!(records[1].warehouse, "Склад Казань");

    // Blank quantity defaults to 1.
    assert_eq!(records[2].quantity, 1.0);
    assert_eq!(records[3].warehouse, DEFAULT_WAREHOUSE);

    // Unparseable quantity defaults to 1, currency symbol is stripped.
    assert_eq!(records[4].quantity, 1.0);
    assert_eq!(records[4].amount, 50.0);

    let last = report.messages.last().expect("summary message");
    assert_eq!(last.level, StatusLevel::Success);
    assert_eq!(last.message, "Processed 5 of 7 records (2 skipped)");
    assert_eq!(report.warnings().count(), 0);
}

#[test]
fn mixed_quantity_and_amount_cells_follow_defaults() {
    let store = ReferenceStore::fallback();
    let rows = vec![
        row(&["город", "товар", "количество", "сумма"]),
        row(&["Москва", "Товар A", "0", "100"]),
        row(&["Москва", "Товар B", " 2 ", "200"]),
        row(&["Москва", "Товар C", "", ""]),
    ];
    let outcome = process_rows(&rows, &GeoResolver::new(&store)).expect("ingest");

    let quantities: Vec<f64> = outcome.records.iter().map(|r| r.quantity).collect();
    let amounts: Vec<f64> = outcome.records.iter().map(|r| r.amount).collect();
    assert_eq!(quantities, vec![0.0, 2.0, 1.0]);
    assert_eq!(amounts, vec![100.0, 200.0, 0.0]);
    assert!(outcome.records.iter().all(|r| r.warehouse == "Склад Москва"));
}

#[test]
fn every_record_has_product_and_warehouse() {
    let store = ReferenceStore::fallback();
    let outcome = process_rows(&sample_rows(), &GeoResolver::new(&store)).expect("ingest");
    for record in &outcome.records {
        assert!(!record.city.trim().is_empty());
        assert!(!record.product.trim().is_empty());
        assert!(!record.warehouse.is_empty());
    }
}

#[test]
fn missing_required_columns_lists_available_headers() {
    let store = ReferenceStore::fallback();
    let rows = vec![row(&["Регион", "Товар", "Сумма"]), row(&["Москва", "Чай", "10"])];

    let err = process_rows(&rows, &GeoResolver::new(&store)).expect_err("city column missing");
    match &err {
        IngestError::MissingColumns { missing, available } => {
            assert_eq!(missing, &vec!["city"]);
            assert_eq!(available, &vec!["Регион", "Товар", "Сумма"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let status = err.status();
    assert_eq!(status.level, StatusLevel::Error);
    assert!(status.message.contains("Регион, Товар, Сумма"));
    assert!(status.message.contains("\"город доставки\""));
}

#[test]
fn header_only_sheet_is_rejected() {
    let store = ReferenceStore::fallback();
    let rows = vec![row(&["Город", "Товар"])];
    let err = process_rows(&rows, &GeoResolver::new(&store)).expect_err("too few rows");
    assert_eq!(err, IngestError::TooFewRows { rows: 1 });
}

#[test]
fn rows_without_city_or_product_produce_no_records() {
    let store = ReferenceStore::fallback();
    let rows = vec![
        row(&["Город", "Товар"]),
        row(&["", "Чай"]),
        row(&["Москва", "  "]),
    ];
    let err = process_rows(&rows, &GeoResolver::new(&store)).expect_err("no valid rows");
    assert_eq!(err, IngestError::NoValidRecords { skipped: 2 });
}

#[test]
fn missing_amount_column_warns_and_zeroes_amounts() {
    let store = ReferenceStore::fallback();
    let rows = vec![row(&["Город доставки", "Наименование"]), row(&["Тула", "Пряник"])];
    let outcome = process_rows(&rows, &GeoResolver::new(&store)).expect("ingest");

    assert_eq!(outcome.records[0].quantity, 1.0);
    assert_eq!(outcome.records[0].amount, 0.0);
    let warnings: Vec<_> = outcome.report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.starts_with("Amount column not found"));
}

#[test]
fn all_zero_amounts_warn() {
    let store = ReferenceStore::fallback();
    let rows = vec![
        row(&["Город", "Товар", "Сумма"]),
        row(&["Тула", "Пряник", "0"]),
        row(&["Омск", "Пряник", "n/a"]),
    ];
    let outcome = process_rows(&rows, &GeoResolver::new(&store)).expect("ingest");
    let warnings: Vec<_> = outcome.report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].message,
        "All values in the amount column are 0 or non-numeric"
    );
}

#[test]
fn zero_quantity_is_preserved() {
    let store = ReferenceStore::fallback();
    let rows = vec![
        row(&["Город", "Товар", "Кол-во"]),
        row(&["Тула", "Пряник", "0"]),
    ];
    let outcome = process_rows(&rows, &GeoResolver::new(&store)).expect("ingest");
    assert_eq!(outcome.records[0].quantity, 0.0);
}

#[test]
fn nomenclature_code_prefixes_product() {
    let store = ReferenceStore::fallback();
    let rows = vec![
        row(&["Артикул", "Город", "Товар"]),
        row(&["A-17", "Пермь", "Чай"]),
        row(&["", "Пермь", "Кофе"]),
    ];
    let outcome = process_rows(&rows, &GeoResolver::new(&store)).expect("ingest");
    assert_eq!(outcome.records[0].product, "A-17 - Чай");
    assert_eq!(outcome.records[1].product, "Кофе");
}

#[test]
fn numeric_cells_are_used_directly() {
    let store = ReferenceStore::fallback();
    let rows = vec![
        row(&["Город", "Товар", "Количество", "Сумма"]),
        vec![
            Cell::text("Омск"),
            Cell::text("Чай"),
            Cell::Number(4.0),
            Cell::Number(99.9),
        ],
    ];
    let outcome = process_rows(&rows, &GeoResolver::new(&store)).expect("ingest");
    assert_eq!(outcome.records[0].quantity, 4.0);
    assert_eq!(outcome.records[0].amount, 99.9);
}

#[test]
fn failed_ingest_clears_previous_records() {
    let store = ReferenceStore::fallback();
    let resolver = GeoResolver::new(&store);
    let mut aggregator = SalesAggregator::new();

    aggregator.ingest(&sample_rows(), &resolver).expect("first ingest");
    assert_eq!(aggregator.records().len(), 5);
    assert!(aggregator.last_report().is_some());

    let bad = vec![row(&["Колонка", "Другая"]), row(&["x", "y"])];
    assert!(aggregator.ingest(&bad, &resolver).is_err());
    assert!(aggregator.records().is_empty());
    assert!(aggregator.last_report().is_none());
}

#[test]
fn successful_ingest_replaces_previous_records() {
    let store = ReferenceStore::fallback();
    let resolver = GeoResolver::new(&store);
    let mut aggregator = SalesAggregator::new();

    aggregator.ingest(&sample_rows(), &resolver).expect("first ingest");
    let rows = vec![row(&["Город", "Товар"]), row(&["Тула", "Пряник"])];
    aggregator.ingest(&rows, &resolver).expect("second ingest");

    assert_eq!(aggregator.records().len(), 1);
    assert_eq!(aggregator.records()[0].warehouse, "Склад Москва");
}
