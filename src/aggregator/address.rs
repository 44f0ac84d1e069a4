// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Address operations: paginated transaction collection

use futures::stream::{self, StreamExt};
use tracing::{debug, warn, Instrument};

use super::EnergyAggregator;
use crate::cache::CacheKey;
use crate::config::constants::{concurrency, upstream::ADDRESS_PAGE_SIZE};
use crate::errors::AggregationError;
use crate::tracing::spans;
use crate::types::{AddressTransactions, Transaction};

/// Number of `rawaddr` pages needed to cover `n_tx` transactions
///
/// # Examples
///
/// ```rust
/// use energyscan::address_page_count;
///
/// assert_eq!(address_page_count(0), 0);
/// assert_eq!(address_page_count(50), 1);
/// assert_eq!(address_page_count(51), 2);
/// ```
pub fn address_page_count(n_tx: u64) -> usize {
    let pages = n_tx.div_ceil(ADDRESS_PAGE_SIZE as u64);
    usize::try_from(pages).unwrap_or(usize::MAX)
}

impl EnergyAggregator {
    /// Collects every transaction of `address`, with energy costs
    ///
    /// A cached set is returned as-is; its capture timestamp is not checked.
    /// On a miss, a one-transaction request learns the total count, then every
    /// page of 50 is fetched strictly one at a time in offset order. A page
    /// that fails is logged, counted, and contributes nothing. The
    /// concatenated list is cached with a capture timestamp.
    ///
    /// # Errors
    ///
    /// [`AggregationError::AddressFetch`] when the count request fails.
    pub async fn fetch_all_transactions_for_address(
        &self,
        address: &str,
    ) -> Result<Vec<Transaction>, AggregationError> {
        self.collect_address_transactions(address)
            .instrument(spans::fetch_all_transactions_for_address(address))
            .await
    }

    /// Total energy cost of every transaction of `address`
    ///
    /// # Errors
    ///
    /// Same as [`fetch_all_transactions_for_address`](Self::fetch_all_transactions_for_address).
    pub async fn total_energy_consumption_by_address(
        &self,
        address: &str,
    ) -> Result<f64, AggregationError> {
        let transactions = self.fetch_all_transactions_for_address(address).await?;
        Ok(transactions.iter().map(|tx| tx.energy_cost).sum())
    }

    async fn collect_address_transactions(
        &self,
        address: &str,
    ) -> Result<Vec<Transaction>, AggregationError> {
        let key = CacheKey::address(address);
        if let Some(cached) = self.cached::<AddressTransactions>(&key).await {
            return Ok(cached.transactions);
        }

        let head = self
            .source
            .raw_address(address, 0, 1)
            .await
            .map_err(|source| AggregationError::AddressFetch {
                address: address.to_string(),
                source,
            })?;

        let total_pages = address_page_count(head.n_tx);
        debug!(n_tx = head.n_tx, total_pages, "Fetching address pages");

        let pages: Vec<Vec<Transaction>> = stream::iter(
            (0..total_pages).map(|page| self.address_page(address, page * ADDRESS_PAGE_SIZE)),
        )
        .buffered(concurrency::ADDRESS_PAGES)
        .collect()
        .await;

        let entry = AddressTransactions::captured_now(pages.into_iter().flatten().collect());
        self.store(key, &entry).await;

        Ok(entry.transactions)
    }

    async fn address_page(&self, address: &str, offset: usize) -> Vec<Transaction> {
        match self
            .source
            .raw_address(address, offset, ADDRESS_PAGE_SIZE)
            .await
        {
            Ok(page) => page.txs.into_iter().map(Transaction::from).collect(),
            Err(e) => {
                self.failures.record_address_page();
                warn!(
                    address = %address,
                    offset,
                    error = %e,
                    "Failed to fetch transactions at offset, skipping page"
                );
                Vec::new()
            }
        }
    }
}
