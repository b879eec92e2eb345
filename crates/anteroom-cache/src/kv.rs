#![forbid(unsafe_code)]

//! Key-value backend seam for persisted cache entries.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::{entry::CacheEntry, error::CacheResult};

/// Default entry lifetime: 24 hours. An expired entry is indistinguishable
/// from one that never existed.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Narrow interface over an expiring key-value backend.
///
/// One [`CacheEntry`] per key. Backend failures propagate; the cache layer
/// adds no retry policy.
#[async_trait]
pub trait KeyValueCache: Send + Sync + 'static {
    async fn get(&self, key: &str) -> CacheResult<Option<CacheEntry>>;

    async fn set(&self, key: &str, entry: &CacheEntry, ttl: Duration) -> CacheResult<()>;

    /// Remove the entry for `key`. Removing a missing key is `Ok(())`.
    async fn delete(&self, key: &str) -> CacheResult<()>;
}

struct StoredEntry {
    payload: String,
    deadline: Instant,
}

/// Process-wide in-memory [`KeyValueCache`].
///
/// Entries are stored as serialized JSON, same as a networked backend would
/// hold them, and lazily expired on `get` (an expired entry reads as absent).
#[derive(Clone, Default)]
pub struct MemoryKv {
    entries: Arc<DashMap<String, StoredEntry>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueCache for MemoryKv {
    async fn get(&self, key: &str) -> CacheResult<Option<CacheEntry>> {
        let live = match self.entries.get(key) {
            Some(stored) if stored.deadline > Instant::now() => Some(stored.payload.clone()),
            Some(_) => None,
            None => return Ok(None),
        };
        match live {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => {
                // Lazy expiry: drop the dead entry on read.
                self.entries.remove(key);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, entry: &CacheEntry, ttl: Duration) -> CacheResult<()> {
        let stored = StoredEntry {
            payload: serde_json::to_string(entry)?,
            deadline: Instant::now() + ttl,
        };
        self.entries.insert(key.to_string(), stored);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
