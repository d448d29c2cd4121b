//! In-memory record set with filtering, grouped summaries and pivots.
//!
//! Every view is rebuilt from the base record set on each call; nothing is
//! cached between filter changes.

mod filter;
mod pivot;
mod view;

use std::collections::BTreeSet;

use crate::ingest::{process_rows, Cell, IngestError, IngestOutcome, IngestReport};
use crate::record::SalesRecord;
use crate::resolver::GeoResolver;

pub use filter::{filter_records, FilterSelection};
pub use pivot::PivotTable;
pub use view::{
    aggregate_by, aggregate_by_pair, summarize, AggregationView, Dimension, GroupTotal, Totals,
};

#[derive(Debug, Clone, Default)]
pub struct SalesAggregator {
    records: Vec<SalesRecord>,
    last_report: Option<IngestReport>,
}

impl SalesAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run an ingest pass and replace the record set with its result. On
    /// failure the record set is left empty.
    pub fn ingest(
        &mut self,
        rows: &[Vec<Cell>],
        resolver: &GeoResolver<'_>,
    ) -> Result<IngestReport, IngestError> {
        let result = process_rows(rows, resolver);
        self.apply(result)
    }

    /// Commit the result of an ingest pass computed elsewhere.
    pub fn apply(
        &mut self,
        result: Result<IngestOutcome, IngestError>,
    ) -> Result<IngestReport, IngestError> {
        match result {
            Ok(outcome) => {
                self.records = outcome.records;
                self.last_report = Some(outcome.report.clone());
                Ok(outcome.report)
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.last_report = None;
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn last_report(&self) -> Option<&IngestReport> {
        self.last_report.as_ref()
    }

    pub fn filter(&self, selection: &FilterSelection) -> Vec<SalesRecord> {
        filter_records(&self.records, selection)
    }

    /// Distinct products, sorted, for filter widgets.
    pub fn products(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.product.as_str()))
    }

    /// Distinct warehouses, sorted, for filter widgets.
    pub fn warehouses(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.warehouse.as_str()))
    }

    pub fn summary(&self, dimension: Dimension, selection: &FilterSelection) -> Vec<GroupTotal> {
        summarize(&self.filter(selection), dimension)
    }

    pub fn summary_by_warehouse(&self, selection: &FilterSelection) -> Vec<GroupTotal> {
        self.summary(Dimension::Warehouse, selection)
    }

    pub fn summary_by_region(&self, selection: &FilterSelection) -> Vec<GroupTotal> {
        self.summary(Dimension::Region, selection)
    }

    pub fn summary_by_product(&self, selection: &FilterSelection) -> Vec<GroupTotal> {
        self.summary(Dimension::Product, selection)
    }

    pub fn pivot(&self, selection: &FilterSelection) -> PivotTable {
        PivotTable::from_records(&self.filter(selection))
    }

    /// Per-warehouse totals for one product within the selection.
    pub fn product_detail(&self, product: &str, selection: &FilterSelection) -> Vec<GroupTotal> {
        let records: Vec<SalesRecord> = self
            .filter(selection)
            .into_iter()
            .filter(|r| r.product == product)
            .collect();
        summarize(&records, Dimension::Warehouse)
    }

    /// Per-product totals for one warehouse within the selection.
    pub fn warehouse_detail(
        &self,
        warehouse: &str,
        selection: &FilterSelection,
    ) -> Vec<GroupTotal> {
        let records: Vec<SalesRecord> = self
            .filter(selection)
            .into_iter()
            .filter(|r| r.warehouse == warehouse)
            .collect();
        summarize(&records, Dimension::Product)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
