use sales_pivot::export::{pivot_to_csv_string, Measure};
use sales_pivot::{PivotTable, SalesRecord};

fn record(warehouse: &str, product: &str, quantity: f64, amount: f64) -> SalesRecord {
    SalesRecord {
        city: "Москва".to_string(),
        region: "Центральный".to_string(),
        warehouse: warehouse.to_string(),
        product: product.to_string(),
        quantity,
        amount,
    }
}

fn pivot() -> PivotTable {
    PivotTable::from_records(&[
        record("Склад Москва", "Чай", 3.0, 120.5),
        record("Склад Казань", "Кофе", 1.0, 80.0),
        record("Склад Москва", "Кофе", 1.0, 70.0),
    ])
}

#[test]
fn quantity_export_has_header_rows_and_totals() {
    let csv = pivot_to_csv_string(&pivot(), Measure::Quantity).expect("export");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Product,Склад Москва,Склад Казань,Total",
            "Чай,3,0,3",
            "Кофе,1,1,2",
            "Total,4,1,5",
        ]
    );
}

#[test]
fn amount_export_keeps_fractions() {
    let csv = pivot_to_csv_string(&pivot(), Measure::Amount).expect("export");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[1], "Чай,120.5,0,120.5");
    assert_eq!(lines[3], "Total,190.5,80,270.5");
}

#[test]
fn amount_export_rounds_float_noise() {
    let pivot = PivotTable::from_records(&[
        record("W1", "P", 1.0, 0.1),
        record("W2", "P", 1.0, 0.2),
    ]);
    let csv = pivot_to_csv_string(&pivot, Measure::Amount).expect("export");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines, vec!["Product,W1,W2,Total", "P,0.1,0.2,0.3", "Total,0.1,0.2,0.3"]);
}

#[test]
fn labels_with_commas_are_quoted() {
    let pivot = PivotTable::from_records(&[record("Склад Москва", "Чай, зелёный", 2.0, 0.0)]);
    let csv = pivot_to_csv_string(&pivot, Measure::Quantity).expect("export");
    assert!(csv.contains("\"Чай, зелёный\",2,2"));
}

#[test]
fn empty_pivot_exports_only_header_and_total() {
    let csv = pivot_to_csv_string(&PivotTable::from_records(&[]), Measure::Quantity)
        .expect("export");
    assert_eq!(csv.lines().collect::<Vec<_>>(), vec!["Product,Total", "Total,0"]);
}

#[test]
fn measure_parses_from_query_values() {
    assert_eq!("amount".parse::<Measure>(), Ok(Measure::Amount));
    assert_eq!(" Quantity ".parse::<Measure>(), Ok(Measure::Quantity));
    assert!("volume".parse::<Measure>().is_err());
}
