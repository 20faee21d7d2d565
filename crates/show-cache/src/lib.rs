//! Disk-persisted cache of trending show listings
//!
//! Holds one entry per (platform, timeframe) pair in memory behind a single
//! readers/writer lock and mirrors each entry to `<platform>-<timeframe>.json`
//! in a cache directory. Entries are loaded in full at startup and judged
//! fresh for 24 hours after they were fetched.

mod cache;
mod error;
mod freshness;
mod key;
mod types;

pub use cache::ShowCache;
pub use error::{CacheError, KeyError, Result};
pub use freshness::{freshness_window, is_fresh, FRESHNESS_WINDOW_HOURS};
pub use key::CacheKey;
pub use types::{CacheEntry, SaveReport};
