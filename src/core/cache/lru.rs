//! Byte-budgeted, time-bounded LRU cache.

use crate::core::clock::{Clock, SystemClock};
use crate::core::error::{FolioError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Values that know how many bytes they occupy in the cache
pub trait CacheValue: Clone {
    fn byte_size(&self) -> usize;
}

impl CacheValue for String {
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl CacheValue for Vec<u8> {
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl CacheValue for serde_json::Value {
    fn byte_size(&self) -> usize {
        json_size(self)
    }
}

/// Size of a value as serialized JSON, for `CacheValue` impls of
/// structured types.
///
/// A value that cannot be serialized reports `usize::MAX`, so `set`
/// rejects it as `TooLarge` instead of caching it for free.
pub fn json_size<T: Serialize + ?Sized>(value: &T) -> usize {
    match serde_json::to_string(value) {
        Ok(json) => json.len(),
        Err(e) => {
            tracing::warn!("Cannot size cache value as JSON: {}", e);
            usize::MAX
        }
    }
}

/// Cache limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheLimits {
    pub max_size_bytes: usize,
    pub max_age: Duration,
    pub max_items: usize,
}

impl Default for CacheLimits {
    fn default() -> Self {
        Self {
            max_size_bytes: 50 * 1024 * 1024,
            max_age: Duration::from_secs(30 * 60),
            max_items: 500,
        }
    }
}

/// Snapshot of cache occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub items: usize,
    pub size_bytes: usize,
    pub max_items: usize,
    pub max_size_bytes: usize,
    pub max_age_ms: u64,
}

#[derive(Debug, Clone)]
struct CacheItem<T> {
    data: T,
    size: usize,
    /// Insertion time, epoch millis
    timestamp: i64,
    /// Last hit, epoch millis
    last_accessed: i64,
    /// Tie-breaker for entries touched within the same millisecond
    sequence: u64,
}

/// LRU cache keyed by document id
///
/// Expiry is checked lazily on access; nothing sweeps in the background.
pub struct ContentCache<T> {
    entries: HashMap<String, CacheItem<T>>,
    current_size: usize,
    limits: CacheLimits,
    clock: Arc<dyn Clock>,
    sequence: u64,
}

impl<T: CacheValue> ContentCache<T> {
    pub fn new(limits: CacheLimits) -> Self {
        Self::with_clock(limits, Arc::new(SystemClock))
    }

    pub fn with_clock(limits: CacheLimits, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            current_size: 0,
            limits,
            clock,
            sequence: 0,
        }
    }

    /// Insert or replace `key`, evicting least-recently-accessed entries
    /// until the new value fits.
    ///
    /// Fails with `TooLarge` (leaving the cache untouched) when the value
    /// alone exceeds the byte budget.
    pub fn set(&mut self, key: impl Into<String>, value: T) -> Result<()> {
        let key = key.into();
        let size = value.byte_size();

        if size > self.limits.max_size_bytes {
            return Err(FolioError::TooLarge {
                size,
                max: self.limits.max_size_bytes,
            });
        }

        self.delete(&key);

        if self.limits.max_items == 0 {
            return Ok(());
        }

        self.ensure_space(size);

        let now = self.clock.now_millis();
        let sequence = self.next_sequence();
        self.entries.insert(
            key,
            CacheItem {
                data: value,
                size,
                timestamp: now,
                last_accessed: now,
                sequence,
            },
        );
        self.current_size += size;

        Ok(())
    }

    /// Fetch `key`, refreshing its recency. Expired entries are evicted
    /// and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<T> {
        let now = self.clock.now_millis();
        let expired = self.is_expired(self.entries.get(key)?, now);

        if expired {
            tracing::debug!("Cache entry '{}' expired", key);
            self.delete(key);
            return None;
        }

        let sequence = self.next_sequence();
        let item = self.entries.get_mut(key)?;
        item.last_accessed = now;
        item.sequence = sequence;
        Some(item.data.clone())
    }

    /// Whether `key` holds a live entry. Does not touch recency and does
    /// not evict, but agrees with `get` on expiry.
    pub fn has(&self, key: &str) -> bool {
        let now = self.clock.now_millis();
        self.entries
            .get(key)
            .is_some_and(|item| !self.is_expired(item, now))
    }

    pub fn delete(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(item) => {
                self.current_size -= item.size;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current_size = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes currently held
    pub fn size_bytes(&self) -> usize {
        self.current_size
    }

    pub fn limits(&self) -> CacheLimits {
        self.limits
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            items: self.entries.len(),
            size_bytes: self.current_size,
            max_items: self.limits.max_items,
            max_size_bytes: self.limits.max_size_bytes,
            max_age_ms: self.limits.max_age.as_millis() as u64,
        }
    }

    fn is_expired(&self, item: &CacheItem<T>, now: i64) -> bool {
        now - item.timestamp > self.limits.max_age.as_millis() as i64
    }

    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    fn ensure_space(&mut self, required: usize) {
        while !self.entries.is_empty()
            && (self.current_size + required > self.limits.max_size_bytes
                || self.entries.len() >= self.limits.max_items)
        {
            // Linear scan; max_items is small
            let lru_key = self
                .entries
                .iter()
                .min_by_key(|(_, item)| (item.last_accessed, item.sequence))
                .map(|(key, _)| key.clone());

            match lru_key {
                Some(key) => {
                    tracing::debug!("Evicting cache entry '{}'", key);
                    self.delete(&key);
                }
                None => break,
            }
        }
    }
}
