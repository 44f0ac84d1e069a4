// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for aggregator operations.
//!
//! Telemetry is kept out of the business logic: each instrumented operation
//! has a span helper here, and the operation attaches it with
//! [`tracing::Instrument`]:
//!
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     self.my_operation_inner(param)
//!         .instrument(spans::my_operation(param))
//!         .await
//! }
//! ```

use tracing::{Level, Span};

/// Span for listing a page of a block's transactions.
///
/// Parent: GraphQL request
/// Children: upstream `rawblock` call on cache miss
#[inline]
pub(crate) fn fetch_block_transactions(block_hash: &str, limit: usize, offset: usize) -> Span {
    tracing::span!(
        Level::INFO,
        "energyscan.fetch_block_transactions",
        block_hash = %block_hash,
        limit = limit,
        offset = offset,
    )
}

/// Span for collecting every transaction of an address.
///
/// Parent: GraphQL request
/// Children: one `rawaddr` count request plus one call per page, sequentially
#[inline]
pub(crate) fn fetch_all_transactions_for_address(address: &str) -> Span {
    tracing::span!(
        Level::INFO,
        "energyscan.fetch_all_transactions_for_address",
        address = %address,
    )
}

/// Span for loading the block list of one UTC day.
///
/// Parent: total_energy_consumption_for_day span
#[inline]
pub(crate) fn fetch_block_data_by_date(date_millis: i64) -> Span {
    tracing::debug_span!(
        "energyscan.fetch_block_data_by_date",
        date_millis = date_millis,
    )
}

/// Span for summing the energy of a set of blocks.
///
/// Parent: total_energy_consumption_for_day span
/// Children: up to 20 concurrent block lookups
#[inline]
pub(crate) fn total_energy_consumption(block_count: usize) -> Span {
    tracing::debug_span!(
        "energyscan.total_energy_consumption",
        block_count = block_count,
    )
}

/// Span for the energy total of one UTC day.
///
/// Parent: total_energy_consumption_per_day span
#[inline]
pub(crate) fn total_energy_consumption_for_day(date_millis: i64) -> Span {
    tracing::debug_span!(
        "energyscan.total_energy_consumption_for_day",
        date_millis = date_millis,
    )
}

/// Span for the per-day energy rollup.
///
/// Parent: GraphQL request
/// Children: up to 5 concurrent day spans
#[inline]
pub(crate) fn total_energy_consumption_per_day(days: usize) -> Span {
    tracing::span!(
        Level::INFO,
        "energyscan.total_energy_consumption_per_day",
        days = days,
    )
}
