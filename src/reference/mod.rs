//! Reference data: the city→region and region→warehouse mappings.
//!
//! Both mappings are loaded once at startup from `Key:Value` text resources.
//! A resource that cannot be fetched is replaced by the built-in table in
//! [fallback]; the resulting [ReferenceStore] is immutable.

pub mod fallback;
mod loader;
mod mapping;

use serde::Serialize;

pub use loader::{fetch_text, load_mapping, MappingOrigin, ReferenceError, ReferenceSource};
pub use mapping::{normalize_key, parse_mapping, MappingEntry, ReferenceMapping};

pub const DEFAULT_CITY_REGIONS_PATH: &str = "data/reference/city_regions.txt";
pub const DEFAULT_REGION_WAREHOUSES_PATH: &str = "data/reference/region_warehouses.txt";

/// Both mappings plus where each one came from.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    city_regions: ReferenceMapping,
    region_warehouses: ReferenceMapping,
    city_regions_origin: MappingOrigin,
    region_warehouses_origin: MappingOrigin,
}

#[derive(Debug, Clone, Serialize)]
pub struct MappingSummary {
    pub entries: usize,
    pub origin: MappingOrigin,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceSummary {
    pub city_regions: MappingSummary,
    pub region_warehouses: MappingSummary,
}

impl ReferenceStore {
    /// Store built from mappings supplied by the caller.
    pub fn new(city_regions: ReferenceMapping, region_warehouses: ReferenceMapping) -> Self {
        Self {
            city_regions,
            region_warehouses,
            city_regions_origin: MappingOrigin::Provided,
            region_warehouses_origin: MappingOrigin::Provided,
        }
    }

    /// Store built only from the built-in tables.
    pub fn fallback() -> Self {
        let reason = "built-in tables requested".to_string();
        Self {
            city_regions: fallback::city_regions(),
            region_warehouses: fallback::region_warehouses(),
            city_regions_origin: MappingOrigin::Fallback {
                reason: reason.clone(),
            },
            region_warehouses_origin: MappingOrigin::Fallback { reason },
        }
    }

    /// Load city→region, then region→warehouse. Never fails: each mapping
    /// falls back independently.
    pub async fn load(
        city_regions_source: &ReferenceSource,
        region_warehouses_source: &ReferenceSource,
    ) -> Self {
        let (city_regions, city_regions_origin) =
            load_mapping(city_regions_source, fallback::city_regions).await;
        let (region_warehouses, region_warehouses_origin) =
            load_mapping(region_warehouses_source, fallback::region_warehouses).await;
        Self {
            city_regions,
            region_warehouses,
            city_regions_origin,
            region_warehouses_origin,
        }
    }

    pub fn city_regions(&self) -> &ReferenceMapping {
        &self.city_regions
    }

    pub fn region_warehouses(&self) -> &ReferenceMapping {
        &self.region_warehouses
    }

    pub fn city_regions_origin(&self) -> &MappingOrigin {
        &self.city_regions_origin
    }

    pub fn region_warehouses_origin(&self) -> &MappingOrigin {
        &self.region_warehouses_origin
    }

    pub fn summary(&self) -> ReferenceSummary {
        ReferenceSummary {
            city_regions: MappingSummary {
                entries: self.city_regions.len(),
                origin: self.city_regions_origin.clone(),
            },
            region_warehouses: MappingSummary {
                entries: self.region_warehouses.len(),
                origin: self.region_warehouses_origin.clone(),
            },
        }
    }
}
