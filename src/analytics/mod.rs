//! Click-analytics aggregation engine
//!
//! Pure, deterministic transformations from raw click events and link records
//! into chart-ready summaries: per-day time series, categorical breakdowns,
//! geographic counts with a quantized color scale, and stable ranked link
//! listings.
//!
//! Everything here is synchronous and free of I/O. The presentation layer
//! fetches the data, picks the view parameters, and re-derives the models on
//! every change; the only shared state is the read-only lookup tables, loaded
//! once at startup.

pub mod breakdown;
pub mod dashboard;
pub mod geo;
pub mod normalize;
pub mod ranking;
pub mod tables;
pub mod timeseries;

pub use breakdown::{breakdown, Breakdown, BreakdownEntry};
pub use dashboard::{LinkDashboard, LinkSummary};
pub use geo::{aggregate_by_country, GeoCounts};
pub use normalize::CategoryNormalizer;
pub use ranking::{rank, SortDirection, SortKey, SortState};
pub use tables::{CategoryTable, CountryCodeTable, Dimension, TableError, Tables};
pub use timeseries::{bucket_by_day, days_in_month, is_leap_year, MonthView, TimeSeries};
