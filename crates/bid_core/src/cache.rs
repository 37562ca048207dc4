//! TTL cache support for the host app's settings/market reads.
//!
//! The scoring and pricing functions only ever see already-resolved
//! values; this module is the explicit cache handle the surrounding
//! data-access layer injects instead of a module-global map. The cache
//! takes `&mut self` (single-writer discipline): wrap it in a mutex if the
//! host runtime reads it from parallel threads.

use std::hash::Hash;
use std::num::NonZeroUsize;

use chrono::{DateTime, Duration, Utc};
use lru::LruCache;
use tracing::debug;

/// Suggested TTLs by data volatility: market and pricing snapshots go
/// stale fastest, per-driver settings slowest.
pub const MARKET_DATA_TTL_MINUTES: i64 = 3;
pub const RATE_SETTINGS_TTL_MINUTES: i64 = 5;
pub const PREFERENCES_TTL_MINUTES: i64 = 10;

/// Time source for expiry decisions, injectable so TTL behavior is
/// testable without sleeping.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Minimal cache interface the data-access layer codes against.
pub trait CacheStore<K, V> {
    fn get(&mut self, key: &K) -> Option<V>;
    fn set(&mut self, key: K, value: V);
    fn expire(&mut self, key: &K);
}

/// LRU-bounded cache where every entry also carries an expiry deadline.
///
/// Capacity bounds memory; the TTL bounds staleness. Expired entries are
/// dropped lazily on read.
pub struct TtlCache<K: Hash + Eq, V: Clone, C: Clock = SystemClock> {
    entries: LruCache<K, (V, DateTime<Utc>)>,
    ttl: Duration,
    clock: C,
}

impl<K: Hash + Eq, V: Clone> TtlCache<K, V, SystemClock> {
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self::with_clock(capacity, ttl, SystemClock)
    }
}

impl<K: Hash + Eq, V: Clone, C: Clock> TtlCache<K, V, C> {
    pub fn with_clock(capacity: NonZeroUsize, ttl: Duration, clock: C) -> Self {
        Self {
            entries: LruCache::new(capacity),
            ttl,
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Hash + Eq, V: Clone, C: Clock> CacheStore<K, V> for TtlCache<K, V, C> {
    fn get(&mut self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            Some((value, deadline)) => {
                if *deadline > now {
                    return Some(value.clone());
                }
                true
            }
            None => false,
        };
        if expired {
            debug!("cache entry expired");
            self.entries.pop(key);
        }
        None
    }

    fn set(&mut self, key: K, value: V) {
        let deadline = self.clock.now() + self.ttl;
        self.entries.put(key, (value, deadline));
    }

    fn expire(&mut self, key: &K) {
        self.entries.pop(key);
    }
}
