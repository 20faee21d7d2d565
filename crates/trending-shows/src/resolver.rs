//! Cache-or-fetch resolution of trending show listings

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Serialize;
use show_cache::{freshness_window, is_fresh, CacheEntry, CacheKey, KeyError, ShowCache};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError};
use streaming_availability::{Show, StreamingClient, StreamingError, Timeframe};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Platform used when a request leaves it empty
pub const DEFAULT_PLATFORM: &str = "netflix";

/// Where shows come from on a cache miss
#[async_trait]
pub trait ShowSource: Send + Sync {
    async fn fetch_shows(
        &self,
        platform: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<Show>, StreamingError>;
}

#[async_trait]
impl ShowSource for StreamingClient {
    async fn fetch_shows(
        &self,
        platform: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<Show>, StreamingError> {
        self.top_shows(platform, timeframe).await
    }
}

#[derive(Debug)]
pub enum ResolveError {
    InvalidKey(KeyError),
    Fetch(StreamingError),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::InvalidKey(e) => write!(f, "{}", e),
            ResolveError::Fetch(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::InvalidKey(e) => Some(e),
            ResolveError::Fetch(e) => Some(e),
        }
    }
}

impl From<KeyError> for ResolveError {
    fn from(e: KeyError) -> Self {
        ResolveError::InvalidKey(e)
    }
}

impl From<StreamingError> for ResolveError {
    fn from(e: StreamingError) -> Self {
        ResolveError::Fetch(e)
    }
}

/// A resolved listing and whether it was served without an upstream call
#[derive(Debug, Clone)]
pub struct Resolved {
    pub entry: Arc<CacheEntry>,
    pub from_cache: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolverStats {
    pub cache_hits: u64,
    pub upstream_fetches: u64,
    pub upstream_failures: u64,
}

/// Serves listings from the cache while fresh and fetches them otherwise.
///
/// Misses on the same key are serialized through a per-key lock, so a burst
/// of requests for one stale listing triggers a single upstream call. A
/// key's lock only lives in the in-flight map while some request holds it.
pub struct ShowResolver {
    cache: Arc<ShowCache>,
    source: Arc<dyn ShowSource>,
    freshness: Duration,
    inflight: std::sync::Mutex<HashMap<CacheKey, Arc<Mutex<()>>>>,
    cache_hits: AtomicU64,
    upstream_fetches: AtomicU64,
    upstream_failures: AtomicU64,
}

impl ShowResolver {
    pub fn new(cache: Arc<ShowCache>, source: Arc<dyn ShowSource>) -> Self {
        Self::with_freshness(cache, source, freshness_window())
    }

    pub fn with_freshness(
        cache: Arc<ShowCache>,
        source: Arc<dyn ShowSource>,
        freshness: Duration,
    ) -> Self {
        Self {
            cache,
            source,
            freshness,
            inflight: std::sync::Mutex::new(HashMap::new()),
            cache_hits: AtomicU64::new(0),
            upstream_fetches: AtomicU64::new(0),
            upstream_failures: AtomicU64::new(0),
        }
    }

    pub fn cache(&self) -> &Arc<ShowCache> {
        &self.cache
    }

    /// Normalize raw request parameters into a cache key
    pub fn key_for(platform: &str, timeframe: &str) -> Result<CacheKey, KeyError> {
        let platform = if platform.is_empty() {
            DEFAULT_PLATFORM
        } else {
            platform
        };
        CacheKey::new(platform, Timeframe::from_param(timeframe))
    }

    pub async fn resolve(
        &self,
        platform: &str,
        timeframe: &str,
        force_refresh: bool,
    ) -> Result<Resolved, ResolveError> {
        let key = Self::key_for(platform, timeframe)?;

        if !force_refresh {
            if let Some(entry) = self.fresh_entry(&key).await {
                return Ok(entry);
            }
        }

        let slot = self.key_lock(&key);
        let _guard = slot.lock.lock().await;

        // Another request may have refreshed this key while we waited
        if !force_refresh {
            if let Some(entry) = self.fresh_entry(&key).await {
                return Ok(entry);
            }
        }

        let entry = self.fetch_and_store(key).await?;
        Ok(Resolved {
            entry,
            from_cache: false,
        })
    }

    async fn fresh_entry(&self, key: &CacheKey) -> Option<Resolved> {
        let entry = self.cache.get(key).await?;
        if !is_fresh(&entry, Utc::now(), self.freshness) {
            debug!(key = %key, timestamp = %entry.timestamp, "Cache entry stale");
            return None;
        }

        debug!(key = %key, "Cache hit");
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
        Some(Resolved {
            entry,
            from_cache: true,
        })
    }

    fn key_lock(&self, key: &CacheKey) -> InflightSlot<'_> {
        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        let lock = inflight
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        InflightSlot {
            resolver: self,
            key: key.clone(),
            lock,
        }
    }

    async fn fetch_and_store(&self, key: CacheKey) -> Result<Arc<CacheEntry>, ResolveError> {
        self.upstream_fetches.fetch_add(1, Ordering::Relaxed);
        let shows = match self
            .source
            .fetch_shows(key.platform(), key.timeframe())
            .await
        {
            Ok(shows) => shows,
            Err(e) => {
                self.upstream_failures.fetch_add(1, Ordering::Relaxed);
                return Err(e.into());
            }
        };

        let count = shows.len();
        let entry = self.cache.put(key.clone(), CacheEntry::new(shows)).await;

        if let Err(e) = self.cache.persist(&key).await {
            warn!(key = %key, error = %e, "Failed to persist cache entry");
        }

        info!(key = %key, shows = count, "Fetched and cached shows");
        Ok(entry)
    }

    pub fn stats(&self) -> ResolverStats {
        ResolverStats {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            upstream_fetches: self.upstream_fetches.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
        }
    }
}

/// A handle on one key's lock. Dropping the last handle removes the key
/// from the in-flight map, including when the request is cancelled.
struct InflightSlot<'a> {
    resolver: &'a ShowResolver,
    key: CacheKey,
    lock: Arc<Mutex<()>>,
}

impl Drop for InflightSlot<'_> {
    fn drop(&mut self) {
        let mut inflight = self
            .resolver
            .inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Handles are only cloned under the map lock: one for the map, one for us
        if Arc::strong_count(&self.lock) == 2 {
            inflight.remove(&self.key);
        }
    }
}
