// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{
    build_schema, serve_api, BlockchainInfoClient, CacheBackend, EnergyAggregator, EnergyCache,
    EnergyscanConfig, MemoryCache, NoOpCache, RedisCache,
};

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Load configuration from .env and the process environment
    let config = EnergyscanConfig::from_env()?;

    let listener = TcpListener::bind(&format!("0.0.0.0:{}", config.api_port)).await?;

    // Create the upstream client
    let source = Arc::new(BlockchainInfoClient::new(&config)?);
    info!(upstream = %source.base_url(), "Using upstream provider");

    let cache = connect_cache(&config).await;

    let aggregator = Arc::new(EnergyAggregator::new(source, cache));
    let schema = build_schema(aggregator);

    // Start the API server
    serve_api(listener, schema).await?;

    Ok(())
}

/// Builds the configured cache backend.
///
/// An unreachable Redis is logged and replaced by [`NoOpCache`], so the
/// service keeps answering from upstream alone.
pub async fn connect_cache(config: &EnergyscanConfig) -> Arc<dyn EnergyCache> {
    match config.cache_backend {
        CacheBackend::Redis => match RedisCache::connect(&config.redis).await {
            Ok(cache) => {
                info!(endpoint = %cache.endpoint(), "Connected to Redis");
                Arc::new(cache)
            }
            Err(e) => {
                error!(error = %e, "Redis unavailable, running without a cache");
                Arc::new(NoOpCache)
            }
        },
        CacheBackend::Memory => {
            let cache = match config.memory_max_entries {
                Some(max) => MemoryCache::new().with_max_entries(max),
                None => MemoryCache::new(),
            };
            info!(max_entries = ?config.memory_max_entries, "Using in-memory cache");
            Arc::new(cache)
        }
        CacheBackend::None => {
            info!("Caching disabled");
            Arc::new(NoOpCache)
        }
    }
}
