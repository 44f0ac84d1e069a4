// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Upstream blockchain data source
//!
//! The aggregator talks to the data provider only through the [`BlockSource`]
//! trait. [`BlockchainInfoClient`] is the production implementation over the
//! blockchain.info REST API; tests substitute scripted sources.
//!
//! Only the fields the aggregator consumes are modeled. Unknown fields in
//! upstream payloads are ignored.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::UpstreamError;

mod blockchain_info;

pub use blockchain_info::BlockchainInfoClient;

/// A transaction as listed by `rawblock` and `rawaddr`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub hash: String,
    /// Serialized size in bytes
    pub size: u64,
}

/// Payload of `GET /rawblock/{hash}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBlock {
    pub hash: String,
    pub height: u64,
    /// Unix seconds
    pub time: u64,
    /// Whole-block byte size
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub tx: Vec<RawTransaction>,
}

/// Payload of `GET /rawaddr/{address}?offset=&limit=`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAddress {
    /// Total number of transactions involving the address
    pub n_tx: u64,
    /// The requested page of transactions
    #[serde(default)]
    pub txs: Vec<RawTransaction>,
}

/// Source of raw block and address data
///
/// Implementations perform exactly one request per call and never retry.
/// Every failure, whether transport, status or decoding, is reported as an
/// [`UpstreamError`]; deciding whether it is fatal is up to the caller.
#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Fetch a block with its transactions
    async fn raw_block(&self, block_hash: &str) -> Result<RawBlock, UpstreamError>;

    /// Fetch one page of an address's transactions
    async fn raw_address(
        &self,
        address: &str,
        offset: usize,
        limit: usize,
    ) -> Result<RawAddress, UpstreamError>;

    /// Fetch the blocks mined on the UTC day starting at `date_millis`
    ///
    /// The body is returned undecoded: the provider answers with an array on
    /// success and an error object otherwise, and telling the two apart is
    /// the caller's job.
    async fn blocks_for_date(&self, date_millis: i64) -> Result<serde_json::Value, UpstreamError>;
}
