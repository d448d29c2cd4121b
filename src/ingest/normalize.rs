//! Row normalization: required text fields plus forgiving numeric parsing.

use super::cell::Cell;
use super::columns::ColumnIndexes;

pub const DEFAULT_QUANTITY: f64 = 1.0;
pub const DEFAULT_AMOUNT: f64 = 0.0;

const CURRENCY_SYMBOLS: &[char] = &['₽', '$', '€'];

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub city: String,
    pub product: String,
    pub quantity: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyRow,
    MissingCity,
    MissingProduct,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyRow => "empty row",
            Self::MissingCity => "missing city",
            Self::MissingProduct => "missing product",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Normalized(NormalizedRow),
    Skip(SkipReason),
}

fn cell_text(row: &[Cell], index: usize) -> String {
    row.get(index)
        .map(|cell| cell.to_string().trim().to_string())
        .unwrap_or_default()
}

pub fn normalize_row(row: &[Cell], columns: &ColumnIndexes) -> RowOutcome {
    if row.iter().all(Cell::is_blank) {
        return RowOutcome::Skip(SkipReason::EmptyRow);
    }

    let city = cell_text(row, columns.city);
    if city.is_empty() {
        return RowOutcome::Skip(SkipReason::MissingCity);
    }
    let mut product = cell_text(row, columns.product);
    if product.is_empty() {
        return RowOutcome::Skip(SkipReason::MissingProduct);
    }

    if let Some(code) = columns.nomenclature.map(|index| cell_text(row, index)) {
        if !code.is_empty() {
            product = format!("{code} - {product}");
        }
    }

    let quantity = columns
        .quantity
        .map(|index| parse_quantity(row.get(index)))
        .unwrap_or(DEFAULT_QUANTITY);
    let amount = columns
        .amount
        .map(|index| parse_amount(row.get(index)))
        .unwrap_or(DEFAULT_AMOUNT);

    RowOutcome::Normalized(NormalizedRow {
        city,
        product,
        quantity,
        amount,
    })
}

/// Missing or unparseable quantity becomes 1. A literal 0 stays 0.
pub fn parse_quantity(cell: Option<&Cell>) -> f64 {
    parse_numeric_cell(cell, &[]).unwrap_or(DEFAULT_QUANTITY)
}

/// Currency symbols are stripped; missing or unparseable amount becomes 0.
pub fn parse_amount(cell: Option<&Cell>) -> f64 {
    parse_numeric_cell(cell, CURRENCY_SYMBOLS).unwrap_or(DEFAULT_AMOUNT)
}

fn parse_numeric_cell(cell: Option<&Cell>, strip: &[char]) -> Option<f64> {
    let cell = cell?;
    if let Some(value) = cell.as_number() {
        return Some(value);
    }
    parse_decimal(&cell.to_string(), strip)
}

/// Remove whitespace (and `strip` characters), turn the first `,` into `.`,
/// then read the longest leading decimal number. `"1 234,50 ₽"` → 1234.5.
pub fn parse_decimal(raw: &str, strip: &[char]) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !strip.contains(c))
        .collect();
    let cleaned = cleaned.replacen(',', ".", 1);
    let prefix = leading_number(&cleaned)?;
    prefix.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Longest prefix shaped like `[+-]digits[.digits][e[+-]digits]`.
fn leading_number(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    Some(&s[..end])
}

#[cfg(test)]
mod tests {
    use super::{normalize_row, parse_amount, parse_decimal, parse_quantity, RowOutcome, SkipReason};
    use crate::ingest::{Cell, ColumnIndexes};

    fn columns() -> ColumnIndexes {
        ColumnIndexes {
            city: 0,
            product: 1,
            quantity: Some(2),
            amount: Some(3),
            nomenclature: None,
        }
    }

    #[test]
    fn quantity_defaults() {
        assert_eq!(parse_quantity(Some(&Cell::from(" 2 "))), 2.0);
        assert_eq!(parse_quantity(Some(&Cell::from(""))), 1.0);
        assert_eq!(parse_quantity(Some(&Cell::Empty)), 1.0);
        assert_eq!(parse_quantity(None), 1.0);
        assert_eq!(parse_quantity(Some(&Cell::from("шт"))), 1.0);
        assert_eq!(parse_quantity(Some(&Cell::from("0"))), 0.0);
        assert_eq!(parse_quantity(Some(&Cell::Number(0.0))), 0.0);
        assert_eq!(parse_quantity(Some(&Cell::Number(f64::NAN))), 1.0);
    }

    #[test]
    fn decimal_comma_and_trailing_units() {
        assert_eq!(parse_decimal("2,5", &[]), Some(2.5));
        assert_eq!(parse_decimal("12 шт", &[]), Some(12.0));
        assert_eq!(parse_decimal("1e3", &[]), Some(1000.0));
        assert_eq!(parse_decimal("1e", &[]), Some(1.0));
        assert_eq!(parse_decimal(".5", &[]), Some(0.5));
        assert_eq!(parse_decimal("-3", &[]), Some(-3.0));
        assert_eq!(parse_decimal(".", &[]), None);
        assert_eq!(parse_decimal("Infinity", &[]), None);
    }

    #[test]
    fn only_first_comma_becomes_a_point() {
        assert_eq!(parse_decimal("1,234,5", &[]), Some(1.234));
    }

    #[test]
    fn amount_strips_currency_and_grouping_spaces() {
        assert_eq!(parse_amount(Some(&Cell::from("1 234,50 ₽"))), 1234.5);
        assert_eq!(parse_amount(Some(&Cell::from("$99"))), 99.0);
        assert_eq!(parse_amount(Some(&Cell::from("10\u{a0}000 €"))), 10000.0);
        assert_eq!(parse_amount(Some(&Cell::from("n/a"))), 0.0);
        assert_eq!(parse_amount(None), 0.0);
    }

    #[test]
    fn rows_without_city_or_product_are_skipped() {
        let row = vec![Cell::from(" "), Cell::from("Товар"), Cell::Empty, Cell::Empty];
        assert_eq!(normalize_row(&row, &columns()), RowOutcome::Skip(SkipReason::MissingCity));
        let row = vec![Cell::from("Тула"), Cell::Empty, Cell::Empty, Cell::Empty];
        assert_eq!(
            normalize_row(&row, &columns()),
            RowOutcome::Skip(SkipReason::MissingProduct)
        );
        assert_eq!(normalize_row(&[], &columns()), RowOutcome::Skip(SkipReason::EmptyRow));
    }

    #[test]
    fn short_rows_fall_back_to_defaults() {
        let row = vec![Cell::from("Тула"), Cell::from("Пряник")];
        let RowOutcome::Normalized(normalized) = normalize_row(&row, &columns()) else {
            panic!("row should normalize");
        };
        assert_eq!(normalized.quantity, 1.0);
        assert_eq!(normalized.amount, 0.0);
    }

    #[test]
    fn nomenclature_prefixes_product() {
        let mut cols = columns();
        cols.nomenclature = Some(4);
        let row = vec![
            Cell::from("Тула"),
            Cell::from("Пряник"),
            Cell::Number(3.0),
            Cell::Number(150.0),
            Cell::from("A-17"),
        ];
        let RowOutcome::Normalized(normalized) = normalize_row(&row, &cols) else {
            panic!("row should normalize");
        };
        assert_eq!(normalized.product, "A-17 - Пряник");
        assert_eq!(normalized.quantity, 3.0);
        assert_eq!(normalized.amount, 150.0);
    }
}
