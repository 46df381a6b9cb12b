//! In-memory content cache.
//!
//! A generic LRU cache bounded by total bytes, entry age and entry count.
//! The storage manager uses it to avoid re-reading document bodies from
//! disk; it holds no durable state and is empty after a restart.

mod lru;

pub use lru::{json_size, CacheLimits, CacheStats, CacheValue, ContentCache};
