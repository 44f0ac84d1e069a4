// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-block operations: transaction listing and whole-block energy totals

use futures::stream::{self, StreamExt};
use tracing::{warn, Instrument};

use super::EnergyAggregator;
use crate::config::constants::concurrency;
use crate::errors::AggregationError;
use crate::tracing::spans;
use crate::types::{BlockRef, Transaction};

impl EnergyAggregator {
    /// Lists the `[offset, offset + limit)` window of a block's transactions
    ///
    /// The whole block is materialized and cached on the first request, so
    /// later requests for any window of the same block are served from cache.
    /// An out-of-range window yields an empty list.
    ///
    /// # Errors
    ///
    /// [`AggregationError::UpstreamFetch`] when the block is not cached and
    /// the upstream call fails. There is no retry.
    pub async fn fetch_block_transactions(
        &self,
        block_hash: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Transaction>, AggregationError> {
        let block = self
            .load_block(block_hash)
            .instrument(spans::fetch_block_transactions(block_hash, limit, offset))
            .await
            .map_err(|source| AggregationError::UpstreamFetch {
                block_hash: block_hash.to_string(),
                source,
            })?;

        Ok(block.transaction_page(limit, offset))
    }

    /// Sums the whole-block energy cost over `blocks`
    ///
    /// Up to 20 blocks are looked up at once. A block without a known size
    /// contributes `0`, and so does a block whose fetch fails (the failure is
    /// logged and counted). This never fails.
    pub async fn total_energy_consumption(&self, blocks: &[BlockRef]) -> f64 {
        let hashes: Vec<String> = blocks.iter().map(|block| block.hash.clone()).collect();
        let lookups = hashes.into_iter().map(|block_hash| async move {
            match self.load_block(&block_hash).await {
                Ok(loaded) => loaded.energy_cost(),
                Err(e) => {
                    self.failures.record_block();
                    warn!(
                        block_hash = %block_hash,
                        error = %e,
                        "Failed to fetch data for block, counting it as zero"
                    );
                    0.0
                }
            }
        });

        stream::iter(lookups)
            .buffer_unordered(concurrency::BLOCKS)
            .fold(0.0, |total, cost| async move { total + cost })
            .instrument(spans::total_energy_consumption(blocks.len()))
            .await
    }
}
