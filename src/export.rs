//! Pivot export as a product × warehouse CSV table with totals.
//!
//! Layout: header `Product, <warehouse...>, Total`, one row per product in
//! pivot order, then a closing `Total` row.

use std::io;
use std::str::FromStr;

use thiserror::Error;

use crate::aggregate::{PivotTable, Totals};
use crate::ingest::{format_amount, format_number};

pub const PRODUCT_HEADER: &str = "Product";
pub const TOTAL_LABEL: &str = "Total";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Measure {
    #[default]
    Quantity,
    Amount,
}

impl Measure {
    /// Render the chosen measure; amounts are shown to two decimals at most.
    fn format(&self, totals: &Totals) -> String {
        match self {
            Self::Quantity => format_number(totals.quantity),
            Self::Amount => format_amount(totals.amount),
        }
    }
}

impl FromStr for Measure {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "quantity" | "qty" => Ok(Self::Quantity),
            "amount" => Ok(Self::Amount),
            other => Err(format!("unknown measure '{other}' (expected quantity or amount)")),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush export: {0}")]
    Io(#[from] io::Error),
    #[error("export is not valid UTF-8")]
    Encoding,
}

pub fn write_pivot_csv<W: io::Write>(
    pivot: &PivotTable,
    writer: W,
    measure: Measure,
) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(pivot.warehouses.len() + 2);
    header.push(PRODUCT_HEADER.to_string());
    header.extend(pivot.warehouses.iter().cloned());
    header.push(TOTAL_LABEL.to_string());
    out.write_record(&header)?;

    for (row, product) in pivot.products.iter().enumerate() {
        let mut line = Vec::with_capacity(header.len());
        line.push(product.clone());
        line.extend(pivot.cells[row].iter().map(|cell| measure.format(cell)));
        line.push(measure.format(&pivot.row_totals[row]));
        out.write_record(&line)?;
    }

    let mut totals = Vec::with_capacity(header.len());
    totals.push(TOTAL_LABEL.to_string());
    totals.extend(
        pivot
            .column_totals
            .iter()
            .map(|total| measure.format(total)),
    );
    totals.push(measure.format(&pivot.grand_total));
    out.write_record(&totals)?;

    out.flush()?;
    Ok(())
}

pub fn pivot_to_csv_string(pivot: &PivotTable, measure: Measure) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_pivot_csv(pivot, &mut buffer, measure)?;
    String::from_utf8(buffer).map_err(|_| ExportError::Encoding)
}
