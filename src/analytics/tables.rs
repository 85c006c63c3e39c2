//! Canonical lookup tables for categorical and geographic aggregation
//!
//! The tables are fixed, read-only configuration: they are loaded once at
//! process start and never mutated, so aggregators can share them freely
//! without synchronization. Defaults are embedded in the binary; an operator
//! can override any table by pointing `LINKLENS_TABLES_DIR` at a directory
//! containing replacement JSON files. Adding a country or browser is a data
//! change, not a code change.

use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default table files compiled into the binary
#[derive(RustEmbed)]
#[folder = "assets/tables"]
struct DefaultTables;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read table file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse table {name}")]
    Parse {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("embedded table {0} is missing")]
    MissingEmbedded(&'static str),
}

/// Categorical dimension of a click event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Browser,
    Device,
    Os,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Browser => "browser",
            Dimension::Device => "device",
            Dimension::Os => "os",
        }
    }
}

/// One canonical category with its display color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub color: String,
}

/// Ordered canonical categories for one dimension, plus the catch-all bucket.
///
/// The order of `categories` is the display order of every breakdown built
/// from this table; the catch-all always comes last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTable {
    pub categories: Vec<CategoryEntry>,
    pub catch_all: CategoryEntry,
}

impl CategoryTable {
    /// Look up a canonical entry by exact name.
    pub fn find(&self, name: &str) -> Option<&CategoryEntry> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Whether `name` is one of this table's canonical categories.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

/// Country-name to ISO code mapping plus the choropleth color scale.
///
/// Names missing from `countries` cause the event to be excluded from
/// geographic aggregation; that is intentional data loss for unmapped
/// geographies, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryCodeTable {
    /// Quantization palette, low intensity to high
    pub palette: Vec<String>,

    /// Fill for countries with no clicks at all
    pub unshaded: String,

    /// Free-text country name -> ISO 3166-1 alpha-3 code
    pub countries: BTreeMap<String, String>,
}

impl CountryCodeTable {
    /// Resolve a free-text country name to its ISO code.
    ///
    /// Upstream geolocation occasionally pads names with whitespace, so the
    /// lookup trims before matching.
    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.countries.get(name.trim()).map(String::as_str)
    }
}

/// The full set of lookup tables, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Tables {
    pub browsers: CategoryTable,
    pub devices: CategoryTable,
    pub os: CategoryTable,
    pub countries: CountryCodeTable,
}

const BROWSERS_FILE: &str = "browsers.json";
const DEVICES_FILE: &str = "devices.json";
const OS_FILE: &str = "os.json";
const COUNTRIES_FILE: &str = "countries.json";

impl Tables {
    /// Load all tables, preferring files in `override_dir` when present and
    /// falling back to the embedded defaults per file.
    pub fn load(override_dir: Option<&Path>) -> Result<Self, TableError> {
        Ok(Self {
            browsers: load_table(override_dir, BROWSERS_FILE)?,
            devices: load_table(override_dir, DEVICES_FILE)?,
            os: load_table(override_dir, OS_FILE)?,
            countries: load_table(override_dir, COUNTRIES_FILE)?,
        })
    }

    /// Load the embedded defaults only.
    pub fn embedded() -> Result<Self, TableError> {
        Self::load(None)
    }

    /// The category table for one dimension.
    pub fn category_table(&self, dimension: Dimension) -> &CategoryTable {
        match dimension {
            Dimension::Browser => &self.browsers,
            Dimension::Device => &self.devices,
            Dimension::Os => &self.os,
        }
    }
}

fn load_table<T: serde::de::DeserializeOwned>(
    override_dir: Option<&Path>,
    name: &'static str,
) -> Result<T, TableError> {
    if let Some(dir) = override_dir {
        let path = dir.join(name);
        if path.exists() {
            debug!("loading table {} from {}", name, path.display());
            let bytes = std::fs::read(&path).map_err(|source| TableError::Read {
                path: path.clone(),
                source,
            })?;
            return serde_json::from_slice(&bytes)
                .map_err(|source| TableError::Parse { name, source });
        }
    }

    let file = DefaultTables::get(name).ok_or(TableError::MissingEmbedded(name))?;
    serde_json::from_slice(&file.data).map_err(|source| TableError::Parse { name, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_tables_load() {
        let tables = Tables::embedded().unwrap();
        assert!(!tables.browsers.categories.is_empty());
        assert!(!tables.devices.categories.is_empty());
        assert!(!tables.os.categories.is_empty());
        assert!(!tables.countries.countries.is_empty());
        assert_eq!(tables.countries.palette.len(), 6);
    }

    #[test]
    fn browser_table_order_is_fixed() {
        let tables = Tables::embedded().unwrap();
        let names: Vec<&str> = tables
            .browsers
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["Chrome", "Firefox", "Safari", "Edge", "Opera"]);
        assert_eq!(tables.browsers.catch_all.name, "Others");
    }

    #[test]
    fn country_lookup_trims_whitespace() {
        let tables = Tables::embedded().unwrap();
        assert_eq!(tables.countries.code_for("India"), Some("IND"));
        assert_eq!(tables.countries.code_for("  India "), Some("IND"));
        assert_eq!(tables.countries.code_for("Nowhereland"), None);
    }

    #[test]
    fn override_dir_replaces_single_table() {
        let dir = std::env::temp_dir().join("linklens-table-override-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(BROWSERS_FILE),
            r##"{"categories":[{"name":"Netscape","color":"#000000"}],
                "catch_all":{"name":"Others","color":"#A0AEC0"}}"##,
        )
        .unwrap();

        let tables = Tables::load(Some(&dir)).unwrap();
        assert!(tables.browsers.contains("Netscape"));
        assert!(!tables.browsers.contains("Chrome"));
        // Files not present in the override dir still come from the defaults.
        assert!(tables.devices.contains("Mobile"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
