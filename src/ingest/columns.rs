//! Header detection by synonym substring match.

use serde::Serialize;

use super::cell::Cell;
use super::IngestError;

pub const CITY_SYNONYMS: &[&str] = &["город", "city", "город доставки"];
pub const PRODUCT_SYNONYMS: &[&str] = &["товар", "product", "наименование", "название"];
pub const QUANTITY_SYNONYMS: &[&str] = &[
    "количество",
    "quantity",
    "кол-во",
    "qty",
    "доставлено шт",
    "заказано шт",
];
pub const AMOUNT_SYNONYMS: &[&str] = &[
    "сумма",
    "amount",
    "стоимость",
    "price",
    "цена",
    "общая сумма",
    "итого",
    "доставлено руб",
    "заказано руб",
];
pub const NOMENCLATURE_SYNONYMS: &[&str] = &["номенклатура", "артикул", "sku", "code"];

/// Column positions detected in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnIndexes {
    pub city: usize,
    pub product: usize,
    pub quantity: Option<usize>,
    pub amount: Option<usize>,
    pub nomenclature: Option<usize>,
}

/// First header (left to right) whose lower-cased text contains any synonym.
pub fn find_column_index(headers: &[Cell], synonyms: &[&str]) -> Option<usize> {
    let synonyms: Vec<String> = synonyms.iter().map(|s| s.to_lowercase()).collect();
    headers.iter().position(|header| {
        let header = header.to_string().to_lowercase();
        synonyms.iter().any(|synonym| header.contains(synonym.as_str()))
    })
}

/// Detect all logical columns. City and product are required.
pub fn detect_columns(headers: &[Cell]) -> Result<ColumnIndexes, IngestError> {
    let city = find_column_index(headers, CITY_SYNONYMS);
    let product = find_column_index(headers, PRODUCT_SYNONYMS);

    let (Some(city), Some(product)) = (city, product) else {
        let mut missing = Vec::new();
        if city.is_none() {
            missing.push("city");
        }
        if product.is_none() {
            missing.push("product");
        }
        return Err(IngestError::MissingColumns {
            missing,
            available: headers.iter().map(ToString::to_string).collect(),
        });
    };

    // A code column is only useful when it is not the product column itself.
    let nomenclature = find_column_index(headers, NOMENCLATURE_SYNONYMS)
        .filter(|&index| index != product && index != city);

    Ok(ColumnIndexes {
        city,
        product,
        quantity: find_column_index(headers, QUANTITY_SYNONYMS),
        amount: find_column_index(headers, AMOUNT_SYNONYMS),
        nomenclature,
    })
}
