// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Redis-backed cache

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, RedisResult};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::{CacheKey, CacheStats, EnergyCache};
use crate::config::{constants, RedisConfig};
use crate::errors::CacheError;

/// Cache stored in a shared Redis instance
///
/// Payloads are JSON strings written with plain `SET` (no expiry). The
/// connection manager reconnects transparently after a dropped connection;
/// operations attempted while the store is down are logged and behave as
/// misses (reads) or errors (writes).
///
/// # Examples
///
/// ```rust,ignore
/// use energyscan::{RedisCache, RedisConfig};
///
/// let cache = RedisCache::connect(&RedisConfig::default()).await?;
/// ```
pub struct RedisCache {
    connection: ConnectionManager,
    endpoint: String,
    stats: Mutex<CacheStats>,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl RedisCache {
    /// Opens a managed connection to the configured Redis instance
    ///
    /// Fails within a couple of seconds when the store is unreachable, so the
    /// caller can decide whether to run uncached.
    pub async fn connect(config: &RedisConfig) -> Result<Self, CacheError> {
        let endpoint = format!("{}:{}", config.host, config.port);
        let url = config
            .connection_url()
            .map_err(|e| CacheError::unavailable(format!("connect {endpoint}"), e))?;

        let client = redis::Client::open(url.as_str())
            .map_err(|e| CacheError::unavailable(format!("connect {endpoint}"), e))?;

        let connect_timeout = Duration::from_millis(constants::redis::CONNECT_TIMEOUT_MS);
        let manager_config = ConnectionManagerConfig::new()
            .set_number_of_retries(constants::redis::RECONNECT_RETRIES)
            .set_connection_timeout(connect_timeout);

        let connection = timeout(
            connect_timeout,
            client.get_connection_manager_with_config(manager_config),
        )
        .await
        .map_err(|e| CacheError::unavailable(format!("connect {endpoint}"), e))?
        .map_err(|e| CacheError::unavailable(format!("connect {endpoint}"), e))?;

        debug!(endpoint = %endpoint, "Connected to Redis");

        Ok(Self {
            connection,
            endpoint,
            stats: Mutex::new(CacheStats::default()),
        })
    }

    /// `host:port` this cache talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EnergyCache for RedisCache {
    async fn get(&self, key: &CacheKey) -> Option<serde_json::Value> {
        let mut connection = self.connection.clone();
        let redis_key = key.to_string();

        let result: RedisResult<Option<String>> = connection.get(&redis_key).await;
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                let error = CacheError::unavailable(format!("GET {redis_key}"), e);
                warn!(error = %error, "Cache read failed, treating as miss");
                self.stats.lock().await.errors += 1;
                return None;
            }
        };

        let Some(raw) = raw else {
            debug!(key = %key, "Cache miss");
            self.stats.lock().await.misses += 1;
            return None;
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key = %key, "Cache hit");
                self.stats.lock().await.hits += 1;
                Some(value)
            }
            Err(e) => {
                let error = CacheError::serialization(redis_key, e);
                warn!(error = %error, "Cached payload is not JSON, treating as miss");
                self.stats.lock().await.errors += 1;
                None
            }
        }
    }

    async fn set(&self, key: CacheKey, value: serde_json::Value) -> Result<(), CacheError> {
        let redis_key = key.to_string();
        let payload = serde_json::to_string(&value)
            .map_err(|e| CacheError::serialization(&redis_key, e))?;

        let mut connection = self.connection.clone();
        let result: RedisResult<()> = connection.set(&redis_key, payload).await;

        let mut stats = self.stats.lock().await;
        match result {
            Ok(()) => {
                debug!(key = %key, "Data cached");
                stats.writes += 1;
                Ok(())
            }
            Err(e) => {
                stats.errors += 1;
                Err(CacheError::unavailable(format!("SET {redis_key}"), e))
            }
        }
    }

    async fn stats(&self) -> CacheStats {
        self.stats.lock().await.clone()
    }

    fn name(&self) -> &'static str {
        "RedisCache"
    }
}
