//! Read spreadsheet files into raw rows of [Cell]s.
//! `.csv` goes through the `csv` reader; anything else is opened with calamine
//! and its first worksheet is used. Fully blank rows are dropped.

use std::fs;
use std::path::Path;

use calamine::Reader;
use thiserror::Error;

use crate::ingest::Cell;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to open workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("workbook has no worksheets")]
    NoSheets,
}

fn from_calamine(data: &calamine::Data) -> Cell {
    match data {
        calamine::Data::Empty => Cell::Empty,
        calamine::Data::String(s) => Cell::Text(s.clone()),
        calamine::Data::Float(f) => Cell::Number(*f),
        calamine::Data::Int(i) => Cell::Number(*i as f64),
        calamine::Data::Bool(b) => Cell::Bool(*b),
        // Serial day number, as the spreadsheet stores it.
        calamine::Data::DateTime(value) => Cell::Number(value.as_f64()),
        other => Cell::Text(other.to_string()),
    }
}

fn drop_blank_rows(rows: Vec<Vec<Cell>>) -> Vec<Vec<Cell>> {
    rows.into_iter()
        .filter(|row| !row.iter().all(Cell::is_blank))
        .collect()
}

/// Parse CSV text. No header handling: row 0 is returned like any other row.
pub fn read_csv_str(text: &str) -> Result<Vec<Vec<Cell>>, SheetError> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::text(field)
                    }
                })
                .collect(),
        );
    }
    Ok(drop_blank_rows(rows))
}

/// Read the first worksheet of a workbook (xlsx, xls, xlsb, ods).
pub fn read_workbook(path: &Path) -> Result<Vec<Vec<Cell>>, SheetError> {
    let mut workbook = calamine::open_workbook_auto(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SheetError::NoSheets)?;
    let range = workbook.worksheet_range(&sheet_name)?;
    tracing::debug!(sheet = %sheet_name, size = ?range.get_size(), "worksheet loaded");
    let rows = range
        .rows()
        .map(|row| row.iter().map(from_calamine).collect())
        .collect();
    Ok(drop_blank_rows(rows))
}

/// Read a sales file by extension.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<Cell>>, SheetError> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        let text = fs::read_to_string(path).map_err(|source| SheetError::Read {
            path: path.display().to_string(),
            source,
        })?;
        read_csv_str(&text)
    } else {
        read_workbook(path)
    }
}
