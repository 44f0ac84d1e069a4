// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Energy cost analytics over Bitcoin blocks and addresses.
//!
//! Block and address data is fetched from the blockchain.info REST API, turned
//! into per-transaction energy costs, memoized in a cache, and served through a
//! GraphQL API.
//!
//! - [`EnergyAggregator`]: the fetch-aggregate-cache pipeline
//! - [`BlockSource`] / [`BlockchainInfoClient`]: the upstream REST client
//! - [`EnergyCache`]: cache backends ([`RedisCache`], [`MemoryCache`], [`NoOpCache`])
//! - [`build_schema`] / [`serve_api`]: the GraphQL surface

mod aggregator;
mod api;
pub mod bootstrap;
mod cache;
mod config;
mod energy;
mod errors;
mod query;
mod tracing;
mod types;
mod upstream;

pub use aggregator::{address_page_count, day_starts, EnergyAggregator, FailureCounts, FailureStats};
pub use api::{router, serve_api};
pub use cache::{CacheKey, CacheStats, EnergyCache, MemoryCache, NoOpCache, RedisCache};
pub use config::{constants, CacheBackend, EnergyscanConfig, EnergyscanConfigBuilder, RedisConfig};
pub use energy::energy_cost;
pub use errors::{AggregationError, CacheError, ConfigError, EnergyscanError, UpstreamError};
pub use query::{build_schema, EnergyscanSchema, QueryRoot, HELLO_MESSAGE};
pub use types::{AddressTransactions, Block, BlockRef, TimestampMillis, Transaction};
pub use upstream::{BlockSource, BlockchainInfoClient, RawAddress, RawBlock, RawTransaction};
