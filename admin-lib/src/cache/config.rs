use std::time::Duration;

/// How long each kind of response stays cached.
///
/// A zero TTL turns caching off for that kind.
///
/// ```
/// use std::time::Duration;
/// use admin_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default().with_query_ttl(Duration::from_secs(60));
/// assert_eq!(config.query_ttl, Duration::from_secs(60));
/// assert!(config.listing_ttl.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Product pages. Five minutes by default.
    pub query_ttl: Duration,
    /// Firm and user listings. Zero by default, so a delete is visible on
    /// the next load.
    pub listing_ttl: Duration,
}

impl CacheConfig {
    pub const DEFAULT_QUERY_TTL: Duration = Duration::from_secs(5 * 60);

    pub fn with_query_ttl(self, query_ttl: Duration) -> Self {
        Self { query_ttl, ..self }
    }

    pub fn with_listing_ttl(self, listing_ttl: Duration) -> Self {
        Self { listing_ttl, ..self }
    }

    /// Every TTL zero.
    pub fn no_cache() -> Self {
        Self {
            query_ttl: Duration::ZERO,
            listing_ttl: Duration::ZERO,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            query_ttl: Self::DEFAULT_QUERY_TTL,
            listing_ttl: Duration::ZERO,
        }
    }
}
