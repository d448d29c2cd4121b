//! Grouped totals keyed by one or two record dimensions.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::Sum;
use std::ops::AddAssign;
use std::str::FromStr;

use serde::Serialize;

use crate::record::SalesRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub quantity: f64,
    pub amount: f64,
}

const QUANTITY_SCALE: f64 = 1000.0;
const AMOUNT_SCALE: f64 = 100.0;

/// Nearest multiple of `1 / scale`. Sums of snapped values snap back to the
/// same grid point whatever order they were added in.
fn snap(value: f64, scale: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let snapped = (value * scale).round() / scale;
    if snapped == 0.0 {
        0.0
    } else {
        snapped
    }
}

impl Totals {
    pub fn new(quantity: f64, amount: f64) -> Self {
        Self {
            quantity: snap(quantity, QUANTITY_SCALE),
            amount: snap(amount, AMOUNT_SCALE),
        }
    }

    pub fn of(record: &SalesRecord) -> Self {
        Self::new(record.quantity, record.amount)
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, other: Self) {
        *self = Self::new(self.quantity + other.quantity, self.amount + other.amount);
    }
}

impl Sum for Totals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut total, item| {
            total += item;
            total
        })
    }
}

impl<'a> Sum<&'a Totals> for Totals {
    fn sum<I: Iterator<Item = &'a Totals>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Record field to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Warehouse,
    Region,
    Product,
    City,
}

impl Dimension {
    pub fn key<'r>(&self, record: &'r SalesRecord) -> &'r str {
        match self {
            Self::Warehouse => &record.warehouse,
            Self::Region => &record.region,
            Self::Product => &record.product,
            Self::City => &record.city,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warehouse => "warehouse",
            Self::Region => "region",
            Self::Product => "product",
            Self::City => "city",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "warehouse" => Ok(Self::Warehouse),
            "region" => Ok(Self::Region),
            "product" => Ok(Self::Product),
            "city" => Ok(Self::City),
            other => Err(format!(
                "unknown dimension '{other}' (expected warehouse, region, product or city)"
            )),
        }
    }
}

/// One row of a rendered grouping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub quantity: f64,
    pub amount: f64,
}

/// Totals per group in discovery order.
#[derive(Debug, Clone)]
pub struct AggregationView<K> {
    groups: Vec<(K, Totals)>,
    positions: HashMap<K, usize>,
}

impl<K> Default for AggregationView<K> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> AggregationView<K> {
    pub fn add(&mut self, key: K, totals: Totals) {
        match self.positions.get(&key) {
            Some(&index) => self.groups[index].1 += totals,
            None => {
                self.positions.insert(key.clone(), self.groups.len());
                self.groups.push((key, totals));
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<Totals> {
        self.positions.get(key).map(|&index| self.groups[index].1)
    }

    pub fn grand_total(&self) -> Totals {
        self.groups.iter().map(|(_, totals)| totals).sum()
    }

    /// Descending by quantity; equal quantities keep discovery order.
    pub fn into_sorted(self) -> Vec<(K, Totals)> {
        let mut groups = self.groups;
        groups.sort_by(|a, b| b.1.quantity.total_cmp(&a.1.quantity));
        groups
    }
}

/// Group records by a single key function.
pub fn aggregate_by<'a, K, I, F>(records: I, key_fn: F) -> AggregationView<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = &'a SalesRecord>,
    F: Fn(&SalesRecord) -> K,
{
    let mut view = AggregationView::default();
    for record in records {
        view.add(key_fn(record), Totals::of(record));
    }
    view
}

/// Group records by a pair of key functions.
pub fn aggregate_by_pair<'a, A, B, I, FA, FB>(
    records: I,
    first: FA,
    second: FB,
) -> AggregationView<(A, B)>
where
    A: Eq + Hash + Clone,
    B: Eq + Hash + Clone,
    I: IntoIterator<Item = &'a SalesRecord>,
    FA: Fn(&SalesRecord) -> A,
    FB: Fn(&SalesRecord) -> B,
{
    aggregate_by(records, |record| (first(record), second(record)))
}

/// Sorted single-dimension summary ready for rendering.
pub fn summarize(records: &[SalesRecord], dimension: Dimension) -> Vec<GroupTotal> {
    aggregate_by(records, |record| dimension.key(record).to_string())
        .into_sorted()
        .into_iter()
        .map(|(key, totals)| GroupTotal {
            key,
            quantity: totals.quantity,
            amount: totals.amount,
        })
        .collect()
}
