// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the energyscan crate.
//!
//! This module provides strongly-typed errors for all public APIs. It follows a
//! hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling ([`UpstreamError`],
//!   [`CacheError`], [`AggregationError`], [`ConfigError`])
//! - **Unified error type** ([`EnergyscanError`]) for callers that do not need to
//!   distinguish between sources
//!
//! # Error policy
//!
//! - [`UpstreamError`] is terminal for single-item operations and swallowed for
//!   batch sub-units.
//! - [`AggregationError::InvalidUpstreamShape`] always reaches the immediate caller.
//! - [`CacheError`] is soft: the aggregator degrades to treating the store as empty.
//!
//! # Examples
//!
//! ```rust,ignore
//! use energyscan::{EnergyscanError, EnergyAggregator};
//!
//! async fn example(aggregator: &EnergyAggregator) -> Result<(), EnergyscanError> {
//!     let total = aggregator.total_energy_consumption_by_address("1A1z...").await?;
//!     println!("{total}");
//!     Ok(())
//! }
//! ```

mod aggregation;
mod cache;
mod config;
mod upstream;

pub use aggregation::AggregationError;
pub use cache::CacheError;
pub use config::ConfigError;
pub use upstream::UpstreamError;

/// Unified error type for all energyscan operations.
///
/// All module-specific error types convert to `EnergyscanError` via `From`, so
/// `?` propagates them naturally.
#[derive(Debug, thiserror::Error)]
pub enum EnergyscanError {
    /// Error from an aggregator operation.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    /// Error from the upstream client.
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Error from a cache backend.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Error from configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
