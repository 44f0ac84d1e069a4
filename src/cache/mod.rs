// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cache backends for the energy pipeline
//!
//! Every cached payload is JSON stored under a prefixed string key:
//!
//! | Key | Payload |
//! |-----|---------|
//! | `block:<hash>` | [`Block`](crate::Block) |
//! | `address:<addr>` | [`AddressTransactions`](crate::AddressTransactions) |
//! | `blocksByDate:<millis>` | raw upstream block list |
//! | `totalEnergyConsumption:<millis>` | bare number |
//!
//! Backends:
//!
//! - [`RedisCache`]: shared network store (production)
//! - [`MemoryCache`]: process-local map with an optional LRU bound
//! - [`NoOpCache`]: always misses; used when no store is reachable
//!
//! Entries never expire. They are only overwritten.
//!
//! # Examples
//!
//! ```rust,ignore
//! use energyscan::{EnergyAggregator, MemoryCache, RedisCache};
//! use std::sync::Arc;
//!
//! let cache = RedisCache::connect(&config.redis).await?;
//! let aggregator = EnergyAggregator::new(source, Arc::new(cache));
//!
//! // Process-local cache, lost on exit
//! let aggregator = EnergyAggregator::new(source, Arc::new(MemoryCache::new()));
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::constants::keys;
use crate::errors::CacheError;

mod memory;
mod noop;
mod redis_cache;

pub use memory::MemoryCache;
pub use noop::NoOpCache;
pub use redis_cache::RedisCache;

/// Key of a cached entity
///
/// The `Display` form is the string stored in the backend. Prefixes keep
/// identifiers of different entity types from colliding.
///
/// # Examples
///
/// ```rust
/// use energyscan::CacheKey;
///
/// assert_eq!(CacheKey::block("abc").to_string(), "block:abc");
/// assert_eq!(CacheKey::TotalEnergyConsumption(0).to_string(), "totalEnergyConsumption:0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Mapped block, by block hash
    Block(String),
    /// Transaction set, by address
    Address(String),
    /// Block list of a UTC day, by midnight epoch millis
    BlocksByDate(i64),
    /// Energy total of a UTC day, by midnight epoch millis
    TotalEnergyConsumption(i64),
}

impl CacheKey {
    pub fn block(hash: impl Into<String>) -> Self {
        CacheKey::Block(hash.into())
    }

    pub fn address(address: impl Into<String>) -> Self {
        CacheKey::Address(address.into())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Block(hash) => write!(f, "{}:{hash}", keys::BLOCK),
            CacheKey::Address(address) => write!(f, "{}:{address}", keys::ADDRESS),
            CacheKey::BlocksByDate(millis) => write!(f, "{}:{millis}", keys::BLOCKS_BY_DATE),
            CacheKey::TotalEnergyConsumption(millis) => {
                write!(f, "{}:{millis}", keys::TOTAL_ENERGY_CONSUMPTION)
            }
        }
    }
}

/// Statistics about cache performance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits (successful retrievals)
    pub hits: u64,
    /// Number of cache misses (key not found)
    pub misses: u64,
    /// Number of successful writes
    pub writes: u64,
    /// Number of entries evicted due to size limits
    pub evictions: u64,
    /// Number of failed store operations, each treated as a miss or a dropped write
    pub errors: u64,
    /// Current number of entries, when the backend knows it
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, writes={}, evictions={}, errors={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.writes,
            self.evictions,
            self.errors,
            self.entries,
            self.hit_rate()
        )
    }
}

/// Trait for cache backends
///
/// # Thread Safety
///
/// Implementations must be thread-safe and support concurrent access. There is
/// no locking discipline across keys: concurrent writers to one key race and
/// the last write wins.
///
/// # Error Handling
///
/// A failed read is logged by the backend and reported as a miss. A failed
/// write is returned to the caller, who typically logs and ignores it.
#[async_trait]
pub trait EnergyCache: Send + Sync {
    /// Retrieves the payload stored under `key`
    ///
    /// Returns `None` if the key is absent or the store could not be read.
    async fn get(&self, key: &CacheKey) -> Option<serde_json::Value>;

    /// Stores `value` under `key`, overwriting unconditionally
    async fn set(&self, key: CacheKey, value: serde_json::Value) -> Result<(), CacheError>;

    /// Returns current cache statistics
    async fn stats(&self) -> CacheStats;

    /// Returns a human-readable name for this cache backend
    fn name(&self) -> &'static str;
}
