use serde::{Deserialize, Serialize};

/// One resolved sales row. Built once per valid input row during an ingest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub city: String,
    /// Stage-A label, or the default region when the city matched nothing.
    pub region: String,
    /// Never empty: unresolved cities land in the default warehouse.
    pub warehouse: String,
    pub product: String,
    pub quantity: f64,
    pub amount: f64,
}
