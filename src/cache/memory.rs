// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory cache implementation with an optional size limit

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use super::{CacheKey, CacheStats, EnergyCache};
use crate::errors::CacheError;

/// Entry in the memory cache with LRU bookkeeping
#[derive(Debug, Clone)]
struct CacheEntry {
    value: serde_json::Value,
    /// Monotonic access counter, lowest is least recently used
    last_access: u64,
}

/// Internal state for memory cache
#[derive(Debug, Default)]
struct MemoryCacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    stats: CacheStats,
    next_access: u64,
}

impl MemoryCacheState {
    fn tick(&mut self) -> u64 {
        let access = self.next_access;
        self.next_access = self.next_access.saturating_add(1);
        access
    }

    fn evict_lru(&mut self) {
        let lru_key = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(key, _)| key.clone());

        if let Some(key) = lru_key {
            debug!(key = %key, "Evicting LRU cache entry");
            self.entries.remove(&key);
            self.stats.evictions += 1;
        }
    }
}

/// In-memory cache with an optional size limit
///
/// Entries never expire; with [`with_max_entries`](Self::with_max_entries) the
/// least recently used entry is evicted once the limit is reached.
///
/// # Examples
///
/// ```rust
/// use energyscan::MemoryCache;
///
/// // Unbounded cache
/// let cache = MemoryCache::new();
///
/// // At most 10 000 entries
/// let cache = MemoryCache::new().with_max_entries(10_000);
/// ```
#[derive(Debug, Default)]
pub struct MemoryCache {
    max_entries: Option<usize>,
    state: Mutex<MemoryCacheState>,
}

impl MemoryCache {
    /// Creates a new memory cache with no limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of entries in the cache
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries.max(1));
        self
    }
}

#[async_trait]
impl EnergyCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Option<serde_json::Value> {
        let mut state = self.state.lock().await;
        let access = state.tick();

        let value = state.entries.get_mut(key).map(|entry| {
            entry.last_access = access;
            entry.value.clone()
        });

        if value.is_some() {
            state.stats.hits += 1;
            debug!(key = %key, "Cache hit (memory)");
        } else {
            state.stats.misses += 1;
            debug!(key = %key, "Cache miss (memory)");
        }

        value
    }

    async fn set(&self, key: CacheKey, value: serde_json::Value) -> Result<(), CacheError> {
        let mut state = self.state.lock().await;

        if let Some(max_entries) = self.max_entries {
            while !state.entries.contains_key(&key) && state.entries.len() >= max_entries {
                state.evict_lru();
            }
        }

        debug!(key = %key, "Data cached (memory)");
        let last_access = state.tick();
        state.entries.insert(key, CacheEntry { value, last_access });
        state.stats.writes += 1;
        state.stats.entries = state.entries.len();

        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        self.state.lock().await.stats.clone()
    }

    fn name(&self) -> &'static str {
        "MemoryCache"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_cache_basic_operations() {
        let cache = MemoryCache::new();
        let key = CacheKey::block("abc");

        assert!(cache.get(&key).await.is_none());

        cache.set(key.clone(), json!({ "hash": "abc" })).await.unwrap();
        assert_eq!(cache.get(&key).await, Some(json!({ "hash": "abc" })));

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_memory_cache_overwrites() {
        let cache = MemoryCache::new();
        let key = CacheKey::TotalEnergyConsumption(0);

        cache.set(key.clone(), json!(1.0)).await.unwrap();
        cache.set(key.clone(), json!(2.0)).await.unwrap();

        assert_eq!(cache.get(&key).await, Some(json!(2.0)));
        assert_eq!(cache.stats().await.entries, 1);
    }

    #[tokio::test]
    async fn test_memory_cache_keeps_zero() {
        let cache = MemoryCache::new();
        let key = CacheKey::TotalEnergyConsumption(0);

        cache.set(key.clone(), json!(0)).await.unwrap();
        assert_eq!(cache.get(&key).await, Some(json!(0)));
    }

    #[tokio::test]
    async fn test_memory_cache_size_limit() {
        let cache = MemoryCache::new().with_max_entries(3);

        for i in 1..=3 {
            cache.set(CacheKey::BlocksByDate(i), json!([])).await.unwrap();
        }

        // Touch 1 so that 2 becomes least recently used
        assert!(cache.get(&CacheKey::BlocksByDate(1)).await.is_some());

        cache.set(CacheKey::BlocksByDate(4), json!([])).await.unwrap();

        let stats = cache.stats().await;
        assert_eq!(stats.entries, 3);
        assert_eq!(stats.evictions, 1);

        assert!(cache.get(&CacheKey::BlocksByDate(1)).await.is_some());
        assert!(cache.get(&CacheKey::BlocksByDate(3)).await.is_some());
        assert!(cache.get(&CacheKey::BlocksByDate(4)).await.is_some());
        assert!(cache.get(&CacheKey::BlocksByDate(2)).await.is_none());
    }

    #[tokio::test]
    async fn test_memory_cache_overwrite_at_limit_does_not_evict() {
        let cache = MemoryCache::new().with_max_entries(2);
        cache.set(CacheKey::BlocksByDate(1), json!(1)).await.unwrap();
        cache.set(CacheKey::BlocksByDate(2), json!(2)).await.unwrap();
        cache.set(CacheKey::BlocksByDate(2), json!(3)).await.unwrap();

        assert_eq!(cache.stats().await.evictions, 0);
        assert!(cache.get(&CacheKey::BlocksByDate(1)).await.is_some());
    }
}
