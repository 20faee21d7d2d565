//! In-memory show cache mirrored to one JSON file per key

use crate::error::{CacheError, Result};
use crate::key::CacheKey;
use crate::types::{CacheEntry, SaveReport};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Cache of show listings keyed by platform and timeframe
///
/// A single readers/writer lock guards the whole map: lookups run
/// concurrently, inserts are exclusive. File writes are serialized by a
/// separate lock so disk I/O never holds up readers.
pub struct ShowCache {
    /// In-memory entries
    entries: RwLock<HashMap<CacheKey, Arc<CacheEntry>>>,
    /// Directory holding `<key>.json` files
    cache_dir: PathBuf,
    /// Held while writing files
    write_lock: Mutex<()>,
}

impl ShowCache {
    /// Create an empty cache backed by `cache_dir`
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            cache_dir,
            write_lock: Mutex::new(()),
        }
    }

    /// Ensure the cache directory exists
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.cache_dir).await?;
        info!(cache_dir = ?self.cache_dir, "Cache initialized");
        Ok(())
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(key.file_name())
    }

    /// Look up an entry regardless of its age
    pub async fn get(&self, key: &CacheKey) -> Option<Arc<CacheEntry>> {
        let entries = self.entries.read().await;
        entries.get(key).cloned()
    }

    /// Insert or replace the entry for `key` in memory
    pub async fn put(&self, key: CacheKey, entry: CacheEntry) -> Arc<CacheEntry> {
        let entry = Arc::new(entry);
        {
            let mut entries = self.entries.write().await;
            entries.insert(key.clone(), entry.clone());
        }
        debug!(key = %key, shows = entry.shows.len(), "Cache entry stored");
        entry
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Sorted, de-duplicated platforms that currently have an entry
    pub async fn platforms(&self) -> Vec<String> {
        let entries = self.entries.read().await;
        entries
            .keys()
            .map(|k| k.platform().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Load every `<key>.json` file from the cache directory.
    ///
    /// Files that cannot be read, parsed, or mapped back to a key are logged
    /// and skipped. If the directory cannot be opened the cache stays empty.
    /// Returns the number of entries loaded.
    pub async fn load_all(&self) -> usize {
        let mut dir = match fs::read_dir(&self.cache_dir).await {
            Ok(dir) => dir,
            Err(e) => {
                warn!(cache_dir = ?self.cache_dir, error = %e, "Failed to read cache directory");
                return 0;
            }
        };

        let mut loaded = Vec::new();
        loop {
            let dir_entry = match dir.next_entry().await {
                Ok(Some(dir_entry)) => dir_entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(cache_dir = ?self.cache_dir, error = %e, "Failed to list cache directory");
                    break;
                }
            };

            let path = dir_entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let key = match stem.parse::<CacheKey>() {
                Ok(key) => key,
                Err(e) => {
                    warn!(path = ?path, error = %e, "Skipping cache file with invalid name");
                    continue;
                }
            };

            match read_entry(&path).await {
                Ok(entry) => loaded.push((key, entry)),
                Err(e) => {
                    warn!(path = ?path, error = %e, "Skipping unreadable cache file");
                }
            }
        }

        let count = loaded.len();
        {
            let mut entries = self.entries.write().await;
            for (key, entry) in loaded {
                entries.insert(key, Arc::new(entry));
            }
        }

        info!(cache_dir = ?self.cache_dir, count, "Loaded cache from disk");
        count
    }

    /// Write the current entry for `key` to its file
    pub async fn persist(&self, key: &CacheKey) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        // Snapshot under the write lock so the last writer stores the latest entry
        let entry = self
            .get(key)
            .await
            .ok_or_else(|| CacheError::Missing(key.to_string()))?;

        self.write_entry(key, &entry).await?;
        debug!(key = %key, "Cache entry persisted");
        Ok(())
    }

    /// Write every entry to its file. A failure on one file is logged and
    /// the remaining files are still written.
    pub async fn save_all(&self) -> SaveReport {
        let _guard = self.write_lock.lock().await;

        let snapshot: Vec<(CacheKey, Arc<CacheEntry>)> = {
            let entries = self.entries.read().await;
            entries
                .iter()
                .map(|(key, entry)| (key.clone(), entry.clone()))
                .collect()
        };

        let mut report = SaveReport::default();
        for (key, entry) in snapshot {
            match self.write_entry(&key, &entry).await {
                Ok(()) => report.written += 1,
                Err(e) => {
                    warn!(key = %key, error = %e, "Failed to write cache file");
                    report.failed += 1;
                }
            }
        }

        info!(
            written = report.written,
            failed = report.failed,
            "Saved cache to disk"
        );
        report
    }

    /// Serialize an entry next to its final path, then rename into place.
    /// Callers hold `write_lock`.
    async fn write_entry(&self, key: &CacheKey, entry: &CacheEntry) -> Result<()> {
        fs::create_dir_all(&self.cache_dir).await?;

        let json = serde_json::to_vec_pretty(entry)?;
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, json).await?;
        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

async fn read_entry(path: &Path) -> Result<CacheEntry> {
    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}
