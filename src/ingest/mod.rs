//! Ingest pass: header detection, row normalization and warehouse resolution.
//!
//! [process_rows] turns a raw row stream (row 0 = headers) into resolved
//! [SalesRecord]s plus an [IngestReport]. It never touches aggregator state;
//! callers swap the result in only once the whole pass has succeeded.

mod cell;
pub mod columns;
pub mod normalize;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::record::SalesRecord;
use crate::resolver::GeoResolver;
use crate::status::StatusMessage;

pub use cell::{format_amount, format_number, Cell};
pub use columns::{
    detect_columns, find_column_index, ColumnIndexes, AMOUNT_SYNONYMS, CITY_SYNONYMS,
    NOMENCLATURE_SYNONYMS, PRODUCT_SYNONYMS, QUANTITY_SYNONYMS,
};
pub use normalize::{
    normalize_row, parse_amount, parse_decimal, parse_quantity, NormalizedRow, RowOutcome,
    SkipReason,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("sheet must contain a header row and at least one data row (got {rows} row(s))")]
    TooFewRows { rows: usize },
    #[error(
        "required columns not found: {}; available headers: {}",
        .missing.join(", "),
        .available.join(", ")
    )]
    MissingColumns {
        missing: Vec<&'static str>,
        available: Vec<String>,
    },
    #[error("no valid records found: all {skipped} data row(s) lack a city or a product")]
    NoValidRecords { skipped: usize },
}

impl IngestError {
    /// Error status for display, with diagnostics for schema failures.
    pub fn status(&self) -> StatusMessage {
        match self {
            Self::MissingColumns { available, .. } => StatusMessage::error(format!(
                "Required columns not found: city and product.\n\
                 Available headers: {}\n\
                 Expected column names:\n\
                 - city: {}\n\
                 - product: {}",
                available.join(", "),
                quoted(CITY_SYNONYMS),
                quoted(PRODUCT_SYNONYMS),
            )),
            Self::NoValidRecords { .. } => StatusMessage::error(
                "No valid data found. Make sure the file contains cities and products.",
            ),
            Self::TooFewRows { .. } => StatusMessage::error(
                "The file must contain a header row and data (at least 2 rows).",
            ),
        }
    }
}

fn quoted(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub ingest_id: Uuid,
    pub ingested_at: DateTime<Utc>,
    pub headers: Vec<String>,
    pub columns: ColumnIndexes,
    /// Data rows seen, excluding the header row.
    pub total_rows: usize,
    pub processed: usize,
    pub skipped: usize,
    /// Rows whose city matched nothing and went to the default warehouse.
    pub unresolved: usize,
    pub messages: Vec<StatusMessage>,
}

impl IngestReport {
    pub fn warnings(&self) -> impl Iterator<Item = &StatusMessage> {
        self.messages
            .iter()
            .filter(|m| m.level == crate::status::StatusLevel::Warning)
    }
}

#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub records: Vec<SalesRecord>,
    pub report: IngestReport,
}

/// Run one full ingest pass over `rows`.
pub fn process_rows(rows: &[Vec<Cell>], resolver: &GeoResolver<'_>) -> Result<IngestOutcome, IngestError> {
    let mut messages = vec![StatusMessage::info("Processing file...")];

    let Some((headers, data)) = rows.split_first().filter(|_| rows.len() >= 2) else {
        return Err(IngestError::TooFewRows { rows: rows.len() });
    };

    let columns = detect_columns(headers)?;
    tracing::debug!(?columns, "columns detected");

    let mut records = Vec::with_capacity(data.len());
    let mut skipped = 0usize;
    let mut unresolved = 0usize;

    for (offset, row) in data.iter().enumerate() {
        match normalize_row(row, &columns) {
            RowOutcome::Normalized(normalized) => {
                let resolution = resolver.resolve(&normalized.city);
                if !resolution.is_resolved() {
                    unresolved += 1;
                }
                records.push(SalesRecord {
                    region: resolution.region().to_string(),
                    warehouse: resolution.warehouse,
                    city: normalized.city,
                    product: normalized.product,
                    quantity: normalized.quantity,
                    amount: normalized.amount,
                });
            }
            RowOutcome::Skip(reason) => {
                // +2: one for the header row, one for 1-based numbering.
                tracing::debug!(row = offset + 2, reason = reason.as_str(), "row skipped");
                skipped += 1;
            }
        }
    }

    let total_amount: f64 = records.iter().map(|r| r.amount).sum();
    if total_amount == 0.0 {
        match columns.amount {
            None => {
                tracing::warn!("amount column not found, all amounts are 0");
                messages.push(StatusMessage::warning(format!(
                    "Amount column not found. Expected names: {}",
                    quoted(AMOUNT_SYNONYMS)
                )));
            }
            Some(_) => {
                tracing::warn!("amount column holds only zero or non-numeric values");
                messages.push(StatusMessage::warning(
                    "All values in the amount column are 0 or non-numeric",
                ));
            }
        }
    }

    if records.is_empty() {
        return Err(IngestError::NoValidRecords { skipped });
    }

    let processed = records.len();
    messages.push(StatusMessage::success(format!(
        "Processed {processed} of {} records ({skipped} skipped)",
        data.len()
    )));
    tracing::info!(processed, skipped, unresolved, "ingest complete");

    Ok(IngestOutcome {
        records,
        report: IngestReport {
            ingest_id: Uuid::new_v4(),
            ingested_at: Utc::now(),
            headers: headers.iter().map(ToString::to_string).collect(),
            columns,
            total_rows: data.len(),
            processed,
            skipped,
            unresolved,
            messages,
        },
    })
}
