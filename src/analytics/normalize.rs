//! Normalization of raw categorical strings onto canonical categories

use crate::analytics::tables::{Dimension, Tables};

/// Maps raw browser/device/OS strings onto the fixed canonical set for a
/// dimension, with the table's catch-all for everything unmatched.
///
/// Normalization is a total function: absent, empty, and unrecognized values
/// are data, not errors, and land in the catch-all bucket.
pub struct CategoryNormalizer<'a> {
    tables: &'a Tables,
}

impl<'a> CategoryNormalizer<'a> {
    pub fn new(tables: &'a Tables) -> Self {
        Self { tables }
    }

    /// Normalize `raw` for `dimension`, returning the canonical category name.
    ///
    /// OS strings are truncated at the first whitespace before matching, so
    /// version-qualified values like "Windows 10.0" and "Windows 11" collapse
    /// into the same product-family bucket. This is deliberately lossy:
    /// distribution names ("Ubuntu 22.04") that do not match a canonical
    /// family fall through to the catch-all.
    pub fn normalize(&self, dimension: Dimension, raw: Option<&str>) -> &'a str {
        let table = self.tables.category_table(dimension);

        let candidate = match raw {
            None => return table.catch_all.name.as_str(),
            Some(value) => match dimension {
                Dimension::Os => value.split_whitespace().next().unwrap_or(""),
                Dimension::Browser | Dimension::Device => value.trim(),
            },
        };

        match table.find(candidate) {
            Some(entry) => entry.name.as_str(),
            None => table.catch_all.name.as_str(),
        }
    }
}
