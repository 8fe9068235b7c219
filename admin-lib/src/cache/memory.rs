use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::{CacheEntry, CacheProvider};

/// Process-local cache on a concurrent map.
///
/// Stale entries are dropped lazily on read, or in bulk by
/// [`evict_stale`](CacheProvider::evict_stale).
///
/// ```
/// use admin_lib::cache::InMemoryCache;
///
/// assert!(InMemoryCache::new().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: DashMap<String, CacheEntry>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry count, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheProvider for InMemoryCache {
    async fn get(&self, key: &str) -> Option<CacheEntry> {
        let now = Utc::now();
        // The read guard must be released before removing.
        let hit = self
            .entries
            .get(key)
            .map(|e| (!e.is_stale_at(now)).then(|| e.value().clone()))?;
        if hit.is_none() {
            self.entries.remove_if(key, |_, e| e.is_stale_at(now));
        }
        hit
    }

    async fn put(&self, key: &str, entry: CacheEntry) {
        self.entries.insert(key.to_owned(), entry);
    }

    async fn invalidate(&self, key: &str) {
        self.entries.remove(key);
    }

    async fn invalidate_prefix(&self, prefix: &str) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }

    async fn clear(&self) {
        self.entries.clear();
    }

    async fn evict_stale(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_stale_at(now));
        before.saturating_sub(self.entries.len())
    }
}
