//! Calendar-aware bucketing of click events into per-day time series

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::ClickEvent;

/// One day's bucket in a monthly time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Day of month, zero-padded ("01".."31")
    pub date: String,

    pub clicks: u64,
}

/// Dense per-day click counts for one month, ordered by day ascending.
pub type TimeSeries = Vec<TimeSeriesPoint>;

/// The month a dashboard is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthView {
    pub year: i32,

    /// 1-based month (1 = January)
    pub month: u32,
}

impl MonthView {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month), "month must be 1..=12");
        Self { year, month }
    }

    /// The month before this one, rolling over year boundaries.
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// The month after this one, rolling over year boundaries.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Default view for a freshly loaded dashboard: the month of the newest
    /// event in the snapshot. Events arrive in fetch order with the newest
    /// last, so this scans from the back for the first parseable timestamp.
    pub fn latest_for(events: &[ClickEvent]) -> Option<Self> {
        events
            .iter()
            .rev()
            .find_map(|event| parse_event_date(&event.time))
            .map(|date| Self::new(date.year(), date.month()))
    }
}

/// Gregorian leap-year rule: divisible by 4, except centuries not divisible
/// by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a calendar month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        other => {
            debug_assert!(false, "invalid month {other}");
            0
        }
    }
}

/// Parse an event timestamp into its calendar date, honoring the encoded
/// UTC offset when one is present.
///
/// Returns `None` for malformed input; callers skip the event rather than
/// fail the aggregation, since timestamp quality is owned by upstream
/// ingestion.
pub(crate) fn parse_event_date(time: &str) -> Option<NaiveDate> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(time) {
        // Bucket in the event's own local calendar, not UTC.
        return Some(instant.date_naive());
    }

    // Some backends emit timestamps without an offset.
    if let Ok(naive) = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.date());
    }

    debug!("skipping event with malformed timestamp: {time:?}");
    None
}

/// Group events into per-day buckets for the selected month.
///
/// The result always has exactly `view.days()` entries labeled "01".."NN",
/// zero-filled for days with no clicks. Events outside the selected month
/// and events with malformed timestamps are ignored.
pub fn bucket_by_day(events: &[ClickEvent], view: MonthView) -> TimeSeries {
    let days = view.days() as usize;
    let mut counts = vec![0u64; days];

    for event in events {
        let Some(date) = parse_event_date(&event.time) else {
            continue;
        };
        if date.year() != view.year || date.month() != view.month {
            continue;
        }
        counts[date.day() as usize - 1] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(index, clicks)| TimeSeriesPoint {
            date: format!("{:02}", index + 1),
            clicks,
        })
        .collect()
}
