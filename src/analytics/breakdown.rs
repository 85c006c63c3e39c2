//! Categorical breakdowns (browser / device / OS) over click events

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::analytics::normalize::CategoryNormalizer;
use crate::analytics::tables::{Dimension, Tables};
use crate::models::ClickEvent;

/// One category's slice of a breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub name: String,
    pub count: u64,

    /// Display color from the category table
    pub color: String,
}

/// Counts per canonical category for one dimension.
///
/// Every canonical category appears exactly once, in table order, followed by
/// the catch-all, regardless of whether it matched any events. Renderers never
/// have to special-case absent categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breakdown {
    pub dimension: Dimension,
    pub entries: Vec<BreakdownEntry>,

    /// Number of input events, for percentage display
    pub total: u64,
}

impl Breakdown {
    /// Share of the total for one category's count, in percent.
    ///
    /// Returns 0 for an empty input collection instead of dividing by zero.
    pub fn percentage(&self, count: u64) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }

    /// Combined click count across all categories, for center labels in
    /// ring-style charts. Equals `total` by construction.
    pub fn total_clicks(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// Count normalized categories across a click collection.
pub fn breakdown(tables: &Tables, events: &[ClickEvent], dimension: Dimension) -> Breakdown {
    let normalizer = CategoryNormalizer::new(tables);
    let table = tables.category_table(dimension);

    let mut counts: HashMap<&str, u64> = HashMap::new();
    for event in events {
        let raw = match dimension {
            Dimension::Browser => event.browser.as_deref(),
            Dimension::Device => event.device.as_deref(),
            Dimension::Os => event.os.as_deref(),
        };
        let canonical = normalizer.normalize(dimension, raw);
        *counts.entry(canonical).or_insert(0) += 1;
    }

    let entries = table
        .categories
        .iter()
        .chain(std::iter::once(&table.catch_all))
        .map(|category| BreakdownEntry {
            name: category.name.clone(),
            count: counts.get(category.name.as_str()).copied().unwrap_or(0),
            color: category.color.clone(),
        })
        .collect();

    Breakdown {
        dimension,
        entries,
        total: events.len() as u64,
    }
}
