//! Cache types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use streaming_availability::Show;

/// One cached listing: the shows of a platform/timeframe and when they were
/// fetched. This is also the on-disk file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub timestamp: DateTime<Utc>,
    pub shows: Vec<Show>,
}

impl CacheEntry {
    /// Entry for shows fetched just now
    pub fn new(shows: Vec<Show>) -> Self {
        Self::with_timestamp(Utc::now(), shows)
    }

    pub fn with_timestamp(timestamp: DateTime<Utc>, shows: Vec<Show>) -> Self {
        Self { timestamp, shows }
    }
}

/// Outcome of writing every entry to disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub written: usize,
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_file_format_field_names() {
        let entry = CacheEntry::with_timestamp(
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            vec![json!({ "title": "Severance" })],
        );

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["timestamp"], "2024-03-01T10:00:00Z");
        assert_eq!(value["shows"][0]["title"], "Severance");
    }

    #[test]
    fn test_timestamp_with_offset_is_normalized_to_utc() {
        let json = r#"{"timestamp": "2024-03-01T05:00:00-05:00", "shows": []}"#;
        let entry: CacheEntry = serde_json::from_str(json).unwrap();
        assert_eq!(
            entry.timestamp,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
        );
        assert!(entry.shows.is_empty());
    }

    #[test]
    fn test_missing_shows_field_is_rejected() {
        let json = r#"{"timestamp": "2024-03-01T10:00:00Z"}"#;
        assert!(serde_json::from_str::<CacheEntry>(json).is_err());
    }
}
