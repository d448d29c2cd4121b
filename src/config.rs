//! Environment-driven settings, read once at startup.

use std::env;
use std::path::PathBuf;

use crate::reference::{ReferenceSource, DEFAULT_CITY_REGIONS_PATH, DEFAULT_REGION_WAREHOUSES_PATH};

pub const BIND_ENV: &str = "SALES_PIVOT_BIND";
pub const CITY_REGIONS_ENV: &str = "SALES_PIVOT_CITY_REGIONS";
pub const REGION_WAREHOUSES_ENV: &str = "SALES_PIVOT_REGION_WAREHOUSES";
pub const STATIC_DIR_ENV: &str = "SALES_PIVOT_STATIC_DIR";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "frontend/dist";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub city_regions: ReferenceSource,
    pub region_warehouses: ReferenceSource,
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            bind_addr: get(BIND_ENV, DEFAULT_BIND_ADDR),
            city_regions: ReferenceSource::parse(&get(CITY_REGIONS_ENV, DEFAULT_CITY_REGIONS_PATH)),
            region_warehouses: ReferenceSource::parse(&get(
                REGION_WAREHOUSES_ENV,
                DEFAULT_REGION_WAREHOUSES_PATH,
            )),
            static_dir: PathBuf::from(get(STATIC_DIR_ENV, DEFAULT_STATIC_DIR)),
        }
    }
}
