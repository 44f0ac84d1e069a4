// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! No-operation cache that disables caching entirely

use async_trait::async_trait;

use super::{CacheKey, CacheStats, EnergyCache};
use crate::errors::CacheError;

/// A no-operation cache that disables caching entirely
///
/// Reads always miss and writes are dropped. This is what the service runs on
/// when the configured store cannot be reached at startup, so every query
/// still works, just without memoization.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCache;

#[async_trait]
impl EnergyCache for NoOpCache {
    async fn get(&self, _key: &CacheKey) -> Option<serde_json::Value> {
        None
    }

    async fn set(&self, _key: CacheKey, _value: serde_json::Value) -> Result<(), CacheError> {
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        CacheStats::default()
    }

    fn name(&self) -> &'static str {
        "NoOpCache"
    }
}
