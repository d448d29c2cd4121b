//! Product × warehouse pivot with row, column and grand totals.

use serde::Serialize;

use super::view::{aggregate_by, aggregate_by_pair, Totals};
use crate::record::SalesRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PivotTable {
    /// Row labels, by descending product quantity.
    pub products: Vec<String>,
    /// Column labels, by descending warehouse quantity.
    pub warehouses: Vec<String>,
    /// `cells[row][column]`; zero where a product never shipped from a warehouse.
    pub cells: Vec<Vec<Totals>>,
    pub row_totals: Vec<Totals>,
    pub column_totals: Vec<Totals>,
    pub grand_total: Totals,
}

impl PivotTable {
    pub fn from_records(records: &[SalesRecord]) -> Self {
        let by_product = aggregate_by(records, |r| r.product.clone());
        let grand_total = by_product.grand_total();
        let products: Vec<String> = by_product
            .into_sorted()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        let warehouses: Vec<String> = aggregate_by(records, |r| r.warehouse.clone())
            .into_sorted()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        let matrix = aggregate_by_pair(records, |r| r.product.clone(), |r| r.warehouse.clone());

        let cells: Vec<Vec<Totals>> = products
            .iter()
            .map(|product| {
                warehouses
                    .iter()
                    .map(|warehouse| {
                        matrix
                            .get(&(product.clone(), warehouse.clone()))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        let row_totals: Vec<Totals> = cells.iter().map(|row| row.iter().sum()).collect();

        let mut column_totals = vec![Totals::default(); warehouses.len()];
        for row in &cells {
            for (column, cell) in row.iter().enumerate() {
                column_totals[column] += *cell;
            }
        }

        Self {
            products,
            warehouses,
            cells,
            row_totals,
            column_totals,
            grand_total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn cell(&self, product: &str, warehouse: &str) -> Option<Totals> {
        let row = self.products.iter().position(|p| p == product)?;
        let column = self.warehouses.iter().position(|w| w == warehouse)?;
        Some(self.cells[row][column])
    }
}
