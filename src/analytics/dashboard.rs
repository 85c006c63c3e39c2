//! One-call derivation of the per-link dashboard view model
//!
//! The presentation layer owns data fetching and change detection; whenever
//! the click snapshot or the selected view parameters change, it calls
//! [`LinkDashboard::derive`] again and replaces the whole model. Nothing here
//! is patched incrementally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::breakdown::{breakdown, Breakdown};
use crate::analytics::geo::{aggregate_by_country, GeoCounts};
use crate::analytics::tables::{Dimension, Tables};
use crate::analytics::timeseries::{bucket_by_day, MonthView, TimeSeries};
use crate::models::{ClickEvent, LinkRecord};

/// Header facts about the link itself, for the dashboard's summary card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummary {
    pub short_url: String,
    pub original_url: String,

    /// Original URL length in characters
    pub length: u64,

    /// Server-side click total; may differ from the number of events in the
    /// snapshot, which is fetched separately
    pub click_counts: u64,

    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub country_name: Option<String>,
}

impl LinkSummary {
    pub fn from_record(link: &LinkRecord) -> Self {
        Self {
            short_url: link.short_url.clone(),
            original_url: link.url.clone(),
            length: link.length,
            click_counts: link.click_counts,
            created_at: link.created_at,
            created_by: link.user.as_ref().and_then(|u| u.username.clone()),
            country_name: link.country_name.clone(),
        }
    }
}

/// Complete chart-ready model for one link's analytics page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDashboard {
    pub summary: LinkSummary,
    pub view: MonthView,
    pub time_series: TimeSeries,
    pub browsers: Breakdown,
    pub devices: Breakdown,
    pub operating_systems: Breakdown,
    pub geo: GeoCounts,
}

impl LinkDashboard {
    /// Derive the full dashboard from one data snapshot and one set of view
    /// parameters. Pure and synchronous; identical inputs give identical
    /// output.
    pub fn derive(
        tables: &Tables,
        link: &LinkRecord,
        clicks: &[ClickEvent],
        view: MonthView,
    ) -> Self {
        Self {
            summary: LinkSummary::from_record(link),
            view,
            time_series: bucket_by_day(clicks, view),
            browsers: breakdown(tables, clicks, Dimension::Browser),
            devices: breakdown(tables, clicks, Dimension::Device),
            operating_systems: breakdown(tables, clicks, Dimension::Os),
            geo: aggregate_by_country(tables, clicks),
        }
    }
}
