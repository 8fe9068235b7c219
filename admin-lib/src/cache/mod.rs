//! Response cache.
//!
//! Entries hold JSON-encoded payloads with an expiry. Firm and user
//! listings use fixed keys; product pages use
//! [`ProductQuery::cache_key`](crate::model::ProductQuery::cache_key), so
//! every parameter combination gets its own entry.

mod config;
mod memory;

pub use config::CacheConfig;
pub use memory::InMemoryCache;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Encoded payload plus its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub bytes: Vec<u8>,
    pub stored_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Entry stored now, live for `ttl`.
    pub fn fresh(bytes: Vec<u8>, ttl: Duration) -> Self {
        let stored_at = Utc::now();
        let expires_at = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|ttl| stored_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            bytes,
            stored_at,
            expires_at,
        }
    }

    pub fn encode<T: Serialize>(value: &T, ttl: Duration) -> serde_json::Result<Self> {
        Ok(Self::fresh(serde_json::to_vec(value)?, ttl))
    }

    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.bytes)
    }

    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_stale(&self) -> bool {
        self.is_stale_at(Utc::now())
    }
}

/// Storage behind [`AdminClient`](crate::AdminClient)'s response cache.
///
/// `get` must treat stale entries as absent.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    async fn get(&self, key: &str) -> Option<CacheEntry>;

    async fn put(&self, key: &str, entry: CacheEntry);

    async fn invalidate(&self, key: &str);

    /// Drop every key starting with `prefix`.
    async fn invalidate_prefix(&self, prefix: &str);

    async fn clear(&self);

    /// Drop stale entries, returning how many went.
    async fn evict_stale(&self) -> usize;
}
