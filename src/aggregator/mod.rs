// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Fetch-aggregate-cache pipeline
//!
//! [`EnergyAggregator`] answers every query by consulting the cache first and
//! falling back to the upstream [`BlockSource`] on a miss. Fan-outs are
//! bounded by fixed in-flight limits:
//!
//! | Operation | Limit | Completion order |
//! |-----------|-------|------------------|
//! | address pages | 1 | sequential, by offset |
//! | days of a rollup | 5 | results kept in request order |
//! | blocks of a day | 20 | unordered, summed |
//!
//! Every fan-out is drained before the operation returns. Single-item
//! operations fail on an upstream error; batch sub-units swallow theirs,
//! log them, and count them in [`FailureStats`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use energyscan::{BlockchainInfoClient, EnergyAggregator, EnergyscanConfig, MemoryCache};
//! use std::sync::Arc;
//!
//! let config = EnergyscanConfig::default();
//! let source = Arc::new(BlockchainInfoClient::new(&config)?);
//! let aggregator = EnergyAggregator::new(source, Arc::new(MemoryCache::new()));
//!
//! let week = aggregator.total_energy_consumption_per_day(7).await;
//! ```

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::{CacheKey, CacheStats, EnergyCache};
use crate::errors::{CacheError, UpstreamError};
use crate::types::Block;
use crate::upstream::BlockSource;

mod address;
mod block;
mod daily;
mod failures;

pub use address::address_page_count;
pub use daily::day_starts;
pub use failures::{FailureCounts, FailureStats};

/// Orchestrates upstream calls, energy derivation and caching
///
/// Cheap to share: wrap it in an `Arc` and hand clones to request handlers.
pub struct EnergyAggregator {
    source: Arc<dyn BlockSource>,
    cache: Arc<dyn EnergyCache>,
    failures: FailureStats,
}

impl std::fmt::Debug for EnergyAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnergyAggregator")
            .field("cache", &self.cache.name())
            .field("failures", &self.failures.snapshot())
            .finish_non_exhaustive()
    }
}

impl EnergyAggregator {
    /// Creates an aggregator over `source`, memoizing through `cache`
    pub fn new(source: Arc<dyn BlockSource>, cache: Arc<dyn EnergyCache>) -> Self {
        Self {
            source,
            cache,
            failures: FailureStats::default(),
        }
    }

    /// Counts of failures swallowed by batch operations so far
    pub fn failure_counts(&self) -> FailureCounts {
        self.failures.snapshot()
    }

    /// Statistics of the underlying cache backend
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Reads and decodes a cached payload
    ///
    /// A payload that does not decode into `T` is logged and reported as a miss,
    /// so it gets recomputed and overwritten.
    async fn cached<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let value = self.cache.get(key).await?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                let error = CacheError::serialization(key.to_string(), e);
                warn!(error = %error, "Cached payload has an unexpected shape, ignoring");
                None
            }
        }
    }

    /// Writes a payload through the cache, logging instead of failing
    async fn store<T: Serialize>(&self, key: CacheKey, value: &T) {
        let payload = match serde_json::to_value(value) {
            Ok(payload) => payload,
            Err(e) => {
                let error = CacheError::serialization(key.to_string(), e);
                warn!(error = %error, "Failed to encode payload for cache");
                return;
            }
        };

        if let Err(e) = self.cache.set(key, payload).await {
            warn!(error = %e, "Cache write failed, continuing uncached");
        }
    }

    /// Loads the canonical [`Block`] for `block_hash`
    ///
    /// Served from `block:<hash>` when present. Otherwise fetched from upstream,
    /// mapped, and cached in full before returning.
    async fn load_block(&self, block_hash: &str) -> Result<Block, UpstreamError> {
        let key = CacheKey::block(block_hash);
        if let Some(block) = self.cached::<Block>(&key).await {
            debug!(block_hash = %block_hash, "Block served from cache");
            return Ok(block);
        }

        let raw = self.source.raw_block(block_hash).await?;
        let block = Block::from(raw);
        self.store(key, &block).await;
        Ok(block)
    }
}
