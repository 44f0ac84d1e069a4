// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for energyscan integration tests
//!
//! Provides a scripted [`BlockSource`] so the aggregator can be exercised
//! without network access.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use energyscan::{
    BlockSource, EnergyAggregator, MemoryCache, RawAddress, RawBlock, RawTransaction,
    UpstreamError,
};
use serde_json::Value;

/// Scripted upstream for aggregator tests
///
/// Unknown blocks and addresses answer with a 404. Every call suspends for a
/// couple of scheduler turns so that concurrent callers overlap, and the peak
/// number of overlapping calls is recorded.
///
/// # Example
///
/// ```rust,ignore
/// let source = MockBlockSource::new()
///     .with_block(raw_block("abc", Some(1000), &[("t0", 250)]))
///     .with_failing_block("broken");
///
/// let aggregator = EnergyAggregator::new(Arc::new(source), Arc::new(MemoryCache::new()));
/// ```
#[derive(Default)]
pub struct MockBlockSource {
    blocks: HashMap<String, RawBlock>,
    failing_blocks: HashSet<String>,
    addresses: HashMap<String, Vec<RawTransaction>>,
    failing_offsets: HashSet<usize>,
    dates: HashMap<i64, Value>,
    failing_dates: HashSet<i64>,
    block_calls: AtomicUsize,
    address_calls: AtomicUsize,
    date_calls: AtomicUsize,
    page_offsets: Mutex<Vec<usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockBlockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `block` from `rawblock`
    pub fn with_block(mut self, block: RawBlock) -> Self {
        self.blocks.insert(block.hash.clone(), block);
        self
    }

    /// Make `rawblock` fail with a transport error for `hash`
    pub fn with_failing_block(mut self, hash: &str) -> Self {
        self.failing_blocks.insert(hash.to_string());
        self
    }

    /// Serve `transactions` from `rawaddr`, paginated by offset and limit
    pub fn with_address(mut self, address: &str, transactions: Vec<RawTransaction>) -> Self {
        self.addresses.insert(address.to_string(), transactions);
        self
    }

    /// Make full-page `rawaddr` requests at `offset` fail
    ///
    /// The single-transaction count request is not affected.
    pub fn with_failing_offset(mut self, offset: usize) -> Self {
        self.failing_offsets.insert(offset);
        self
    }

    /// Serve `payload` from `blocks` for the day starting at `date_millis`
    pub fn with_date(mut self, date_millis: i64, payload: Value) -> Self {
        self.dates.insert(date_millis, payload);
        self
    }

    /// Make `blocks` fail with a transport error for `date_millis`
    pub fn with_failing_date(mut self, date_millis: i64) -> Self {
        self.failing_dates.insert(date_millis);
        self
    }

    pub fn block_calls(&self) -> usize {
        self.block_calls.load(Ordering::SeqCst)
    }

    pub fn address_calls(&self) -> usize {
        self.address_calls.load(Ordering::SeqCst)
    }

    pub fn date_calls(&self) -> usize {
        self.date_calls.load(Ordering::SeqCst)
    }

    /// Offsets of the full-page `rawaddr` requests, in call order
    pub fn page_offsets(&self) -> Vec<usize> {
        self.page_offsets.lock().unwrap().clone()
    }

    /// Highest number of upstream calls that were in flight at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn suspend(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

fn scripted_failure(endpoint: String) -> UpstreamError {
    UpstreamError::transport(
        endpoint,
        io::Error::new(io::ErrorKind::ConnectionReset, "scripted failure"),
    )
}

#[async_trait]
impl BlockSource for MockBlockSource {
    async fn raw_block(&self, block_hash: &str) -> Result<RawBlock, UpstreamError> {
        self.block_calls.fetch_add(1, Ordering::SeqCst);
        self.suspend().await;

        let endpoint = format!("/rawblock/{block_hash}");
        if self.failing_blocks.contains(block_hash) {
            return Err(scripted_failure(endpoint));
        }
        self.blocks
            .get(block_hash)
            .cloned()
            .ok_or_else(|| UpstreamError::status(endpoint, 404))
    }

    async fn raw_address(
        &self,
        address: &str,
        offset: usize,
        limit: usize,
    ) -> Result<RawAddress, UpstreamError> {
        self.address_calls.fetch_add(1, Ordering::SeqCst);
        let count_only = offset == 0 && limit == 1;
        if !count_only {
            self.page_offsets.lock().unwrap().push(offset);
        }
        self.suspend().await;

        let endpoint = format!("/rawaddr/{address}?offset={offset}&limit={limit}");
        if !count_only && self.failing_offsets.contains(&offset) {
            return Err(scripted_failure(endpoint));
        }
        let transactions = self
            .addresses
            .get(address)
            .ok_or_else(|| UpstreamError::status(endpoint, 404))?;

        Ok(RawAddress {
            n_tx: transactions.len() as u64,
            txs: transactions.iter().skip(offset).take(limit).cloned().collect(),
        })
    }

    async fn blocks_for_date(&self, date_millis: i64) -> Result<Value, UpstreamError> {
        self.date_calls.fetch_add(1, Ordering::SeqCst);
        self.suspend().await;

        let endpoint = format!("/blocks/{date_millis}?format=json");
        if self.failing_dates.contains(&date_millis) {
            return Err(scripted_failure(endpoint));
        }
        Ok(self
            .dates
            .get(&date_millis)
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())))
    }
}

/// Helper to create a raw transaction
pub fn raw_tx(hash: &str, size: u64) -> RawTransaction {
    RawTransaction {
        hash: hash.to_string(),
        size,
    }
}

/// Helper to create a raw block from `(hash, size)` transaction pairs
pub fn raw_block(hash: &str, size: Option<u64>, transactions: &[(&str, u64)]) -> RawBlock {
    RawBlock {
        hash: hash.to_string(),
        height: 800_000,
        time: 1_700_000_000,
        size,
        tx: transactions
            .iter()
            .map(|(tx_hash, tx_size)| raw_tx(tx_hash, *tx_size))
            .collect(),
    }
}

/// Helper to create `count` transactions named `<prefix>-<i>`
pub fn numbered_txs(prefix: &str, count: usize) -> Vec<RawTransaction> {
    (0..count)
        .map(|i| raw_tx(&format!("{prefix}-{i}"), 100 + i as u64))
        .collect()
}

/// Aggregator over `source` with a fresh in-memory cache
///
/// The source and cache handles are returned so tests can inspect them.
pub fn aggregator_with(
    source: MockBlockSource,
) -> (EnergyAggregator, Arc<MockBlockSource>, Arc<MemoryCache>) {
    let source = Arc::new(source);
    let cache = Arc::new(MemoryCache::new());
    let aggregator = EnergyAggregator::new(source.clone(), cache.clone());
    (aggregator, source, cache)
}
