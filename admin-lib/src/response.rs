//! Fetch results and where they came from.

use std::ops::Deref;

use chrono::{DateTime, Utc};

use crate::cache::CacheEntry;

/// How the cache took part in a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No cache, or a zero TTL.
    Bypassed,
    /// Fetched from the API and stored.
    Stored { expires_at: DateTime<Utc> },
    /// Answered from an earlier fetch.
    Served {
        stored_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
}

impl CacheStatus {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Bypassed => None,
            Self::Stored { expires_at } | Self::Served { expires_at, .. } => Some(*expires_at),
        }
    }
}

/// Payload returned by [`AdminClient`](crate::AdminClient), tagged with its
/// [`CacheStatus`]. Derefs to the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub data: T,
    pub status: CacheStatus,
}

impl<T> Response<T> {
    pub(crate) fn bypassed(data: T) -> Self {
        Self {
            data,
            status: CacheStatus::Bypassed,
        }
    }

    pub(crate) fn stored(data: T, entry: &CacheEntry) -> Self {
        Self {
            data,
            status: CacheStatus::Stored {
                expires_at: entry.expires_at,
            },
        }
    }

    pub(crate) fn served(data: T, entry: &CacheEntry) -> Self {
        Self {
            data,
            status: CacheStatus::Served {
                stored_at: entry.stored_at,
                expires_at: entry.expires_at,
            },
        }
    }

    /// Whether the payload came out of the cache.
    pub fn is_cached(&self) -> bool {
        matches!(self.status, CacheStatus::Served { .. })
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T> Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}
