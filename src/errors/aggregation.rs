// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the fetch-aggregate-cache operations.
//!
//! Only single-item operations surface these errors. Batch sub-units (address
//! pages, blocks of a day, days of a rollup) swallow their failures and report
//! them through [`FailureStats`](crate::FailureStats) instead.

use super::UpstreamError;

/// Errors that can occur in [`EnergyAggregator`](crate::EnergyAggregator) operations.
///
/// # Examples
///
/// ```rust,ignore
/// use energyscan::{AggregationError, EnergyAggregator};
///
/// match aggregator.fetch_block_transactions("abc", 50, 0).await {
///     Ok(transactions) => println!("{} transactions", transactions.len()),
///     Err(AggregationError::UpstreamFetch { block_hash, source }) => {
///         eprintln!("block {block_hash} unavailable: {source}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    /// Fetching a single block from upstream failed.
    #[error("Failed to fetch block data: {source}")]
    UpstreamFetch {
        /// The requested block hash
        block_hash: String,
        /// The underlying upstream error
        #[source]
        source: UpstreamError,
    },

    /// Learning the transaction count of an address failed.
    #[error("Failed to fetch transactions for address: {source}")]
    AddressFetch {
        /// The requested address
        address: String,
        /// The underlying upstream error
        #[source]
        source: UpstreamError,
    },

    /// Fetching the block list of a day failed.
    #[error("Failed to fetch block data for date {date_millis}: {source}")]
    BlocksByDate {
        /// UTC midnight of the requested day in epoch milliseconds
        date_millis: i64,
        /// The underlying upstream error
        #[source]
        source: UpstreamError,
    },

    /// Upstream answered with data that does not have the expected shape.
    #[error("Failed to fetch block data for date {date_millis}: {details}")]
    InvalidUpstreamShape {
        /// UTC midnight of the requested day in epoch milliseconds
        date_millis: i64,
        /// What was wrong with the payload
        details: String,
    },
}

impl AggregationError {
    /// Create an `InvalidUpstreamShape` error with details.
    pub fn invalid_shape(date_millis: i64, details: impl Into<String>) -> Self {
        AggregationError::InvalidUpstreamShape {
            date_millis,
            details: details.into(),
        }
    }
}
