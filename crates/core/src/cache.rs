//! In-memory response cache with a fixed time-to-live
//!
//! Holds decoded JSON response bodies keyed by the full request URL:
//! - Entries older than the TTL are evicted lazily when read
//! - `clear()` drops everything, e.g. on a session change
//! - Hit, miss and eviction counts are kept for diagnostics
//!
//! # Example
//!
//! ```
//! use safesus_core::cache::{CacheConfig, ResponseCache};
//! use serde_json::json;
//!
//! let cache = ResponseCache::new(CacheConfig::default());
//! cache.set("https://safesus.app/api/cities", json!([{"id": 1}]));
//!
//! assert_eq!(cache.get("https://safesus.app/api/cities"), Some(json!([{"id": 1}])));
//! cache.clear();
//! assert!(cache.get("https://safesus.app/api/cities").is_none());
//! ```

use crate::clock::{Clock, SystemClock};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default time-to-live in seconds
pub const DEFAULT_TTL_SECS: u64 = 60;

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry time-to-live in seconds (0 disables caching)
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

impl CacheConfig {
    /// Configuration with the given TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl_secs: ttl.as_secs(),
        }
    }

    /// TTL as a duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

/// Session-scoped cache of decoded responses.
///
/// No upper bound on entry count: keys are bounded by the API's fixed set of
/// cacheable endpoints.
#[derive(Debug)]
pub struct ResponseCache {
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<String, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl ResponseCache {
    /// Create a cache on the system clock
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a cache on a custom clock
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Configured TTL
    pub fn ttl(&self) -> Duration {
        self.config.ttl()
    }

    /// Get a fresh value.
    ///
    /// An entry whose age has reached the TTL is removed and reported as a miss.
    pub fn get(&self, key: &str) -> Option<Value> {
        let now = self.clock.now();
        let ttl = self.ttl();
        let mut entries = self.write();

        let Some(entry) = entries.get(key) else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(key, "Cache miss");
            return None;
        };

        if now.saturating_duration_since(entry.stored_at) < ttl {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key, "Cache hit");
            return Some(entry.value.clone());
        }

        entries.remove(key);
        self.evictions.fetch_add(1, Ordering::Relaxed);
        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key, "Cache entry expired");
        None
    }

    /// Get a fresh value decoded as `T`.
    ///
    /// An entry that no longer decodes is dropped and treated as a miss.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(key, error = %e, "Dropping undecodable cache entry");
                self.remove(key);
                None
            }
        }
    }

    /// Store a value, replacing any previous entry for the key
    pub fn set(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now(),
        };
        debug!(key = %key, "Cache set");
        self.write().insert(key, entry);
    }

    /// Remove a value, returning whether it was present
    pub fn remove(&self, key: &str) -> bool {
        self.write().remove(key).is_some()
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut entries = self.write();
        let dropped = entries.len();
        entries.clear();
        debug!(dropped, "Cache cleared");
    }

    /// Number of stored entries, expired or not
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            ttl_secs: self.config.ttl_secs,
        }
    }

    /// Return the cached value for `key`, or run `fetch` and cache its result.
    ///
    /// Errors from `fetch` are returned as-is and never cached. Concurrent
    /// callers for the same key each fetch; the last to finish wins the slot.
    pub async fn cached<T, E, F, Fut>(&self, key: &str, fetch: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.get_as::<T>(key) {
            return Ok(value);
        }

        let value = fetch().await?;
        match serde_json::to_value(&value) {
            Ok(json) => self.set(key, json),
            Err(e) => warn!(key, error = %e, "Response not cacheable"),
        }
        Ok(value)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Stored entries, including expired ones not yet read
    pub entries: usize,
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that found nothing fresh
    pub misses: u64,
    /// Entries dropped for being stale
    pub evictions: u64,
    /// Configured TTL in seconds
    pub ttl_secs: u64,
}
