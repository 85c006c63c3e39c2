//! Stable multi-key ranking of owned link records

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::LinkRecord;

/// Field a link listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Clicks,
    Length,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current sort selection of a link listing.
///
/// Selecting the active key flips the direction; selecting a different key
/// resets to descending, so the first click on any column always shows
/// most-clicked / longest / most-recent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn select(&self, key: SortKey) -> Self {
        if key == self.key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                key,
                direction: SortDirection::Desc,
            }
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

fn compare(a: &LinkRecord, b: &LinkRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Clicks => a.click_counts.cmp(&b.click_counts),
        SortKey::Length => a.length.cmp(&b.length),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

/// Reorder a link collection by the chosen key and direction.
///
/// Returns a new ordering; the input is never mutated, and no record is
/// dropped or duplicated. The sort is stable: records equal under the key
/// keep their relative input order in both directions.
pub fn rank(links: &[LinkRecord], key: SortKey, direction: SortDirection) -> Vec<LinkRecord> {
    let mut ranked = links.to_vec();
    ranked.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn link(id: &str, clicks: u64, length: u64, created_ts: i64) -> LinkRecord {
        LinkRecord {
            id: id.to_string(),
            short_id: id.to_string(),
            short_url: format!("https://sho.rt/{id}"),
            url: "https://example.com".to_string(),
            length,
            click_counts: clicks,
            created_at: Utc.timestamp_opt(created_ts, 0).unwrap(),
            country_name: None,
            user: None,
        }
    }

    fn ids(links: &[LinkRecord]) -> Vec<&str> {
        links.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn ranks_by_clicks_descending() {
        let links = vec![link("a", 2, 10, 100), link("b", 9, 10, 200), link("c", 5, 10, 300)];
        let ranked = rank(&links, SortKey::Clicks, SortDirection::Desc);
        assert_eq!(ids(&ranked), ["b", "c", "a"]);
    }

    #[test]
    fn ranks_by_length_ascending() {
        let links = vec![link("a", 0, 30, 100), link("b", 0, 10, 200), link("c", 0, 20, 300)];
        let ranked = rank(&links, SortKey::Length, SortDirection::Asc);
        assert_eq!(ids(&ranked), ["b", "c", "a"]);
    }

    #[test]
    fn ranks_by_creation_time() {
        let links = vec![link("a", 0, 10, 300), link("b", 0, 10, 100), link("c", 0, 10, 200)];
        let ranked = rank(&links, SortKey::CreatedAt, SortDirection::Desc);
        assert_eq!(ids(&ranked), ["a", "c", "b"]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let links = vec![link("a", 5, 10, 100), link("b", 5, 10, 200), link("c", 2, 10, 300)];

        let desc = rank(&links, SortKey::Clicks, SortDirection::Desc);
        assert_eq!(ids(&desc), ["a", "b", "c"]);

        let asc = rank(&links, SortKey::Clicks, SortDirection::Asc);
        assert_eq!(ids(&asc), ["c", "a", "b"]);
    }

    #[test]
    fn ranking_preserves_every_record() {
        let links = vec![link("a", 1, 1, 1), link("b", 2, 2, 2), link("c", 3, 3, 3)];
        let ranked = rank(&links, SortKey::Length, SortDirection::Desc);

        assert_eq!(ranked.len(), links.len());
        let mut seen: Vec<&str> = ids(&ranked);
        seen.sort();
        assert_eq!(seen, ["a", "b", "c"]);
        // input untouched
        assert_eq!(ids(&links), ["a", "b", "c"]);
    }

    #[test]
    fn selecting_same_key_flips_direction() {
        let state = SortState::default();
        assert_eq!(state.key, SortKey::CreatedAt);
        assert_eq!(state.direction, SortDirection::Desc);

        let toggled = state.select(SortKey::CreatedAt);
        assert_eq!(toggled.direction, SortDirection::Asc);

        let toggled_back = toggled.select(SortKey::CreatedAt);
        assert_eq!(toggled_back.direction, SortDirection::Desc);
    }

    #[test]
    fn selecting_new_key_resets_to_descending() {
        let state = SortState {
            key: SortKey::CreatedAt,
            direction: SortDirection::Asc,
        };
        let next = state.select(SortKey::Clicks);
        assert_eq!(next.key, SortKey::Clicks);
        assert_eq!(next.direction, SortDirection::Desc);
    }
}
