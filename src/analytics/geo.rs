//! Geographic aggregation of clicks onto ISO country codes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analytics::tables::Tables;
use crate::models::ClickEvent;

/// Per-country click counts with the derived quantized color scale.
///
/// `domain_max` is floored at 1 so the scale never has a degenerate `[0, 0]`
/// domain, even when every count is zero. The map only holds countries that
/// were actually seen; `count_for` returns 0 for everything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCounts {
    /// ISO 3166-1 alpha-3 code -> click count
    pub counts: BTreeMap<String, u64>,

    pub domain_max: u64,

    /// Ascending color scale, low intensity to high
    pub color_buckets: Vec<String>,

    /// Fill for countries with zero clicks
    pub unshaded: String,
}

impl GeoCounts {
    /// Click count for a country code; 0 if the code was never seen.
    pub fn count_for(&self, code: &str) -> u64 {
        self.counts.get(code).copied().unwrap_or(0)
    }

    /// Map a count onto the quantized color scale.
    ///
    /// Buckets are equal-width over `[0, domain_max]`. Zero counts render as
    /// the unshaded fill rather than the lowest-intensity bucket. Called
    /// interactively by the rendering layer, e.g. per hovered country.
    pub fn color_for(&self, count: u64) -> &str {
        if count == 0 || self.color_buckets.is_empty() {
            return &self.unshaded;
        }

        let buckets = self.color_buckets.len() as u64;
        let index = (count * buckets / self.domain_max).min(buckets - 1);
        &self.color_buckets[index as usize]
    }
}

/// Count clicks per country code.
///
/// Events with an absent country, or with a name not present in the
/// CountryCodeTable, are silently excluded. That is intentional data loss for
/// unmapped geographies, not a fault; it does not affect other aggregations.
pub fn aggregate_by_country(tables: &Tables, events: &[ClickEvent]) -> GeoCounts {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();

    for event in events {
        let Some(name) = event.country.as_deref() else {
            continue;
        };
        let Some(code) = tables.countries.code_for(name) else {
            continue;
        };
        *counts.entry(code.to_string()).or_insert(0) += 1;
    }

    let domain_max = counts.values().copied().max().unwrap_or(0).max(1);

    GeoCounts {
        counts,
        domain_max,
        color_buckets: tables.countries.palette.clone(),
        unshaded: tables.countries.unshaded.clone(),
    }
}
