//! Time-based staleness policy

use crate::types::CacheEntry;
use chrono::{DateTime, Duration, Utc};

/// How long a fetched listing is served from cache
pub const FRESHNESS_WINDOW_HOURS: i64 = 24;

pub fn freshness_window() -> Duration {
    Duration::hours(FRESHNESS_WINDOW_HOURS)
}

/// True iff the entry is strictly younger than `threshold` at `now`
pub fn is_fresh(entry: &CacheEntry, now: DateTime<Utc>, threshold: Duration) -> bool {
    now - entry.timestamp < threshold
}
