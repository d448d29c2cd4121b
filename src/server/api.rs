use std::sync::{PoisonError, RwLockReadGuard};

use serde::Deserialize;
use thiserror::Error;

use crate::aggregate::{Dimension, FilterSelection, SalesAggregator};
use crate::export::{pivot_to_csv_string, ExportError, Measure};
use crate::ingest::{process_rows, Cell, IngestError};
use crate::reference::ReferenceStore;
use crate::resolver::GeoResolver;
use crate::server::AppState;
use crate::sheet::{read_csv_str, SheetError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestRequest {
    pub rows: Vec<Vec<Cell>>,
}

/// Decoded query string; keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn from_path(path: &str) -> Self {
        let raw = path.split_once('?').map(|(_, q)| q).unwrap_or("");
        let pairs = raw
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (key, value) = part.split_once('=').unwrap_or((part, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `product` and `warehouse` parameters; blank values are ignored.
    pub fn selection(&self) -> FilterSelection {
        FilterSelection::all()
            .with_products(self.get_all("product").filter(|v| !v.trim().is_empty()))
            .with_warehouses(self.get_all("warehouse").filter(|v| !v.trim().is_empty()))
    }
}

fn decode_component(value: &str) -> String {
    let value = value.replace('+', " ");
    percent_encoding::percent_decode_str(&value)
        .decode_utf8_lossy()
        .into_owned()
}

fn read_aggregator(state: &AppState) -> RwLockReadGuard<'_, SalesAggregator> {
    state
        .aggregator
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

pub fn health_payload() -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "sales-pivot",
        "version": env!("CARGO_PKG_VERSION")
    }))?)
}

pub fn reference_payload(reference: &ReferenceStore) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&reference.summary())?)
}

pub fn resolve_payload(reference: &ReferenceStore, path: &str) -> Result<String, ApiError> {
    let query = Query::from_path(path);
    let city = query
        .get("city")
        .ok_or_else(|| ApiError::BadRequest("missing 'city' query parameter".to_string()))?;
    let resolution = GeoResolver::new(reference).resolve(city);
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "city": resolution.city,
        "region": resolution.region(),
        "warehouse": resolution.warehouse,
        "region_match": resolution.region_match,
        "warehouse_match": resolution.warehouse_match,
    }))?)
}

fn ingest(state: &AppState, rows: &[Vec<Cell>]) -> Result<String, ApiError> {
    // Build the new set before taking the write lock so readers never wait on a pass.
    let result = process_rows(rows, &GeoResolver::new(&state.reference));
    let report = state
        .aggregator
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .apply(result)?;
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "report": report,
    }))?)
}

/// An unreadable upload is a failed pass: the previous records are dropped too.
fn discard_records(state: &AppState) {
    state
        .aggregator
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .clear();
}

pub fn ingest_rows_payload(state: &AppState, body: &str) -> Result<String, ApiError> {
    let request: IngestRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(err) => {
            discard_records(state);
            return Err(ApiError::InvalidBody(err.to_string()));
        }
    };
    ingest(state, &request.rows)
}

pub fn ingest_csv_payload(state: &AppState, body: &str) -> Result<String, ApiError> {
    let rows = match read_csv_str(body) {
        Ok(rows) => rows,
        Err(err) => {
            discard_records(state);
            return Err(err.into());
        }
    };
    ingest(state, &rows)
}

pub fn records_payload(state: &AppState, path: &str) -> Result<String, ApiError> {
    let selection = Query::from_path(path).selection();
    let records = read_aggregator(state).filter(&selection);
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "count": records.len(),
        "records": records,
    }))?)
}

pub fn summary_payload(state: &AppState, path: &str) -> Result<String, ApiError> {
    let query = Query::from_path(path);
    let dimension: Dimension = query
        .get("by")
        .unwrap_or("warehouse")
        .parse()
        .map_err(ApiError::BadRequest)?;
    let groups = read_aggregator(state).summary(dimension, &query.selection());
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "by": dimension,
        "groups": groups,
    }))?)
}

pub fn pivot_payload(state: &AppState, path: &str) -> Result<String, ApiError> {
    let selection = Query::from_path(path).selection();
    let pivot = read_aggregator(state).pivot(&selection);
    Ok(serde_json::to_string_pretty(&pivot)?)
}

pub fn detail_payload(state: &AppState, path: &str) -> Result<String, ApiError> {
    let query = Query::from_path(path);
    let selection = query.selection();
    let aggregator = read_aggregator(state);
    let payload = match (query.get("product"), query.get("warehouse")) {
        (Some(product), _) => serde_json::json!({
            "product": product,
            "groups": aggregator.product_detail(product, &selection),
        }),
        (None, Some(warehouse)) => serde_json::json!({
            "warehouse": warehouse,
            "groups": aggregator.warehouse_detail(warehouse, &selection),
        }),
        (None, None) => {
            return Err(ApiError::BadRequest(
                "select a product or a warehouse to see details".to_string(),
            ))
        }
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

pub fn filters_payload(state: &AppState) -> Result<String, ApiError> {
    let aggregator = read_aggregator(state);
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "products": aggregator.products(),
        "warehouses": aggregator.warehouses(),
    }))?)
}

pub fn export_csv_payload(state: &AppState, path: &str) -> Result<String, ApiError> {
    let query = Query::from_path(path);
    let measure: Measure = query
        .get("measure")
        .unwrap_or("quantity")
        .parse()
        .map_err(ApiError::BadRequest)?;
    let pivot = read_aggregator(state).pivot(&query.selection());
    Ok(pivot_to_csv_string(&pivot, measure)?)
}

impl ApiError {
    pub fn status(&self) -> (u16, &'static str) {
        match self {
            Self::InvalidBody(_) | Self::BadRequest(_) | Self::Sheet(_) => (400, "Bad Request"),
            Self::Ingest(_) => (422, "Unprocessable Entity"),
            Self::Export(_) | Self::Serialize(_) => (500, "Internal Server Error"),
        }
    }
}

/// Body for ingest failures: the rendered status plus the raw headers when
/// column detection failed.
pub fn ingest_error_body(err: &IngestError) -> String {
    let status = err.status();
    let mut payload = serde_json::json!({
        "status": status.level,
        "message": status.message,
        "error": err.to_string(),
    });
    if let IngestError::MissingColumns { available, .. } = err {
        payload["available_headers"] = serde_json::json!(available);
    }
    serde_json::to_string_pretty(&payload).unwrap_or_else(|_| err.to_string())
}
