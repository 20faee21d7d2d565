//! Response bodies for the HTTP API

use crate::resolver::{Resolved, ResolverStats};
use chrono::{DateTime, Utc};
use serde::Serialize;
use streaming_availability::Show;

/// Body of `/api/shows` and `/api/refresh`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowsResponse {
    pub shows: Vec<Show>,
    pub cached_timestamp: DateTime<Utc>,
    pub from_cache: bool,
}

impl From<Resolved> for ShowsResponse {
    fn from(resolved: Resolved) -> Self {
        Self {
            shows: resolved.entry.shows.clone(),
            cached_timestamp: resolved.entry.timestamp,
            from_cache: resolved.from_cache,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformsResponse {
    pub platforms: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheSummary {
    pub entries: usize,
    pub platforms: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub cache: CacheSummary,
    pub resolver: ResolverStats,
}
