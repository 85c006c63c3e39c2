//! Data models shared with the fetch and rendering layers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded redirect traversal of a short link.
///
/// Events are immutable after ingestion; aggregators only read them.
/// `time` is kept as the raw ISO-8601 string from the backend and parsed
/// per-aggregation so that one malformed timestamp skips one event rather
/// than failing the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Visit timestamp (ISO-8601 / RFC 3339 string)
    pub time: String,

    /// Visitor country name as reported by upstream geolocation
    #[serde(default)]
    pub country: Option<String>,

    /// Browser name (e.g., "Chrome")
    #[serde(default)]
    pub browser: Option<String>,

    /// Device class (e.g., "Mobile", "Desktop")
    #[serde(default)]
    pub device: Option<String>,

    /// Operating system, possibly version-qualified (e.g., "Windows 10.0")
    #[serde(default)]
    pub os: Option<String>,
}

/// Owner of a shortened link, as embedded in link records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkOwner {
    #[serde(default)]
    pub username: Option<String>,
}

/// Immutable snapshot of one owned short link.
///
/// `click_counts` is maintained server-side and is not required to equal the
/// number of `ClickEvent`s available client-side; the two are fetched
/// independently and may be from different moments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub id: String,
    pub short_id: String,
    pub short_url: String,
    pub url: String,

    /// Length of the original URL in characters
    pub length: u64,

    pub click_counts: u64,
    pub created_at: DateTime<Utc>,

    /// Country the link was created from
    #[serde(default)]
    pub country_name: Option<String>,

    #[serde(default)]
    pub user: Option<LinkOwner>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_event_deserializes_with_missing_fields() {
        let event: ClickEvent =
            serde_json::from_str(r#"{"time":"2024-02-05T10:00:00Z"}"#).unwrap();
        assert_eq!(event.time, "2024-02-05T10:00:00Z");
        assert!(event.country.is_none());
        assert!(event.browser.is_none());
        assert!(event.device.is_none());
        assert!(event.os.is_none());
    }

    #[test]
    fn link_record_deserializes_camel_case() {
        let json = r#"{
            "id": "abc123",
            "shortId": "x1",
            "shortUrl": "https://sho.rt/x1",
            "url": "https://example.com/some/long/path",
            "length": 34,
            "clickCounts": 7,
            "createdAt": "2024-01-15T08:30:00Z",
            "countryName": "India",
            "user": { "username": "asha" }
        }"#;

        let link: LinkRecord = serde_json::from_str(json).unwrap();
        assert_eq!(link.short_id, "x1");
        assert_eq!(link.click_counts, 7);
        assert_eq!(link.country_name.as_deref(), Some("India"));
        assert_eq!(link.user.unwrap().username.as_deref(), Some("asha"));
    }

    #[test]
    fn link_record_tolerates_absent_user() {
        let json = r#"{
            "id": "abc124",
            "shortId": "x2",
            "shortUrl": "https://sho.rt/x2",
            "url": "https://example.com",
            "length": 19,
            "clickCounts": 0,
            "createdAt": "2024-01-15T08:30:00Z"
        }"#;

        let link: LinkRecord = serde_json::from_str(json).unwrap();
        assert!(link.user.is_none());
        assert!(link.country_name.is_none());
    }
}
