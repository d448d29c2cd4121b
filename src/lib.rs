//! Sales pivot engine: resolves delivery cities to fulfillment warehouses and
//! aggregates spreadsheet sales rows into filterable summaries and pivots.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod export;
pub mod ingest;
pub mod record;
pub mod reference;
pub mod resolver;
pub mod server;
pub mod sheet;
pub mod status;

pub use aggregate::{FilterSelection, PivotTable, SalesAggregator, Totals};
pub use ingest::{Cell, ColumnIndexes, IngestError, IngestReport};
pub use record::SalesRecord;
pub use reference::{ReferenceMapping, ReferenceStore};
pub use resolver::{GeoResolver, Resolution, DEFAULT_REGION, DEFAULT_WAREHOUSE};
pub use status::{StatusLevel, StatusMessage};
