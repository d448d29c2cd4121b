//! Two-stage geographic resolution: delivery city → region → warehouse.
//!
//! Each stage tries a case-insensitive exact key match first. Without one,
//! the longest key that contains, or is contained in, the input wins; equal
//! lengths go to the key inserted first. A stage with no candidate ends the
//! resolution in [DEFAULT_WAREHOUSE].

use serde::Serialize;

use crate::reference::{normalize_key, ReferenceMapping, ReferenceStore};

/// Warehouse assigned when either stage finds nothing.
pub const DEFAULT_WAREHOUSE: &str = "Основной склад";
/// Region reported when the city stage finds nothing.
pub const DEFAULT_REGION: &str = "Другие регионы";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Partial,
}

/// Key that satisfied a stage and the label it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageMatch {
    pub kind: MatchKind,
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    CityToRegion,
    RegionToWarehouse,
}

impl Stage {
    fn as_str(&self) -> &'static str {
        match self {
            Self::CityToRegion => "city_to_region",
            Self::RegionToWarehouse => "region_to_warehouse",
        }
    }
}

/// Full trace of one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub city: String,
    pub region_match: Option<StageMatch>,
    pub warehouse_match: Option<StageMatch>,
    pub warehouse: String,
}

impl Resolution {
    fn unresolved(city: &str) -> Self {
        Self {
            city: city.to_string(),
            region_match: None,
            warehouse_match: None,
            warehouse: DEFAULT_WAREHOUSE.to_string(),
        }
    }

    pub fn region(&self) -> &str {
        self.region_match
            .as_ref()
            .map(|m| m.label.as_str())
            .unwrap_or(DEFAULT_REGION)
    }

    /// True when both stages matched.
    pub fn is_resolved(&self) -> bool {
        self.warehouse_match.is_some()
    }
}

/// Run one stage against a mapping.
pub fn match_stage(mapping: &ReferenceMapping, input: &str) -> Option<StageMatch> {
    let needle = normalize_key(input);
    if needle.is_empty() {
        return None;
    }

    if let Some(entry) = mapping.iter().find(|entry| entry.normalized_key == needle) {
        return Some(StageMatch {
            kind: MatchKind::Exact,
            key: entry.key.clone(),
            label: entry.label.clone(),
        });
    }

    let mut best: Option<(usize, &crate::reference::MappingEntry)> = None;
    for entry in mapping.iter() {
        let contains = needle.contains(entry.normalized_key.as_str())
            || entry.normalized_key.contains(needle.as_str());
        if !contains {
            continue;
        }
        // Strictly longer only, so the first-inserted key keeps a tie.
        if best.map_or(true, |(len, _)| entry.key_chars > len) {
            best = Some((entry.key_chars, entry));
        }
    }

    best.map(|(_, entry)| StageMatch {
        kind: MatchKind::Partial,
        key: entry.key.clone(),
        label: entry.label.clone(),
    })
}

/// Resolver over a borrowed [ReferenceStore].
#[derive(Debug, Clone, Copy)]
pub struct GeoResolver<'a> {
    store: &'a ReferenceStore,
}

impl<'a> GeoResolver<'a> {
    pub fn new(store: &'a ReferenceStore) -> Self {
        Self { store }
    }

    /// Stage A only.
    pub fn resolve_region(&self, raw_city: &str) -> Option<StageMatch> {
        match_stage(self.store.city_regions(), raw_city)
    }

    /// Resolve a raw delivery city and report what matched at each stage.
    pub fn resolve(&self, raw_city: &str) -> Resolution {
        let city = raw_city.trim();
        if city.is_empty() {
            trace_resolution(city, Stage::CityToRegion, None, DEFAULT_WAREHOUSE);
            return Resolution::unresolved(city);
        }

        let Some(region_match) = self.resolve_region(city) else {
            trace_resolution(city, Stage::CityToRegion, None, DEFAULT_WAREHOUSE);
            return Resolution::unresolved(city);
        };

        let warehouse_match = match_stage(self.store.region_warehouses(), &region_match.label);
        let warehouse = warehouse_match
            .as_ref()
            .map(|m| m.label.clone())
            .unwrap_or_else(|| DEFAULT_WAREHOUSE.to_string());
        trace_resolution(
            city,
            Stage::RegionToWarehouse,
            warehouse_match.as_ref(),
            &warehouse,
        );

        Resolution {
            city: city.to_string(),
            region_match: Some(region_match),
            warehouse_match,
            warehouse,
        }
    }

    pub fn resolve_warehouse(&self, raw_city: &str) -> String {
        self.resolve(raw_city).warehouse
    }
}

fn trace_resolution(city: &str, stage: Stage, matched: Option<&StageMatch>, warehouse: &str) {
    let outcome = match matched.map(|m| m.kind) {
        Some(MatchKind::Exact) => "exact",
        Some(MatchKind::Partial) => "partial",
        None => "miss",
    };
    tracing::debug!(
        city,
        stage = stage.as_str(),
        matched_key = matched.map(|m| m.key.as_str()).unwrap_or(""),
        outcome,
        warehouse,
        "city resolved"
    );
}
