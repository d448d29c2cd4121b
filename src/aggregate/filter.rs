use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::SalesRecord;

/// Multi-select over products and warehouses. An empty set means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub products: BTreeSet<String>,
    #[serde(default)]
    pub warehouses: BTreeSet<String>,
}

impl FilterSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_products<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.products.extend(products.into_iter().map(Into::into));
        self
    }

    pub fn with_warehouses<I, S>(mut self, warehouses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.warehouses.extend(warehouses.into_iter().map(Into::into));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.warehouses.is_empty()
    }

    pub fn matches(&self, record: &SalesRecord) -> bool {
        (self.products.is_empty() || self.products.contains(&record.product))
            && (self.warehouses.is_empty() || self.warehouses.contains(&record.warehouse))
    }
}

pub fn filter_records(records: &[SalesRecord], selection: &FilterSelection) -> Vec<SalesRecord> {
    records
        .iter()
        .filter(|record| selection.matches(record))
        .cloned()
        .collect()
}
