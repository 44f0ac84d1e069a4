// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! blockchain.info REST client
//!
//! Endpoints used:
//! 1. `/rawblock/{hash}` - a block with its transactions
//! 2. `/rawaddr/{address}?offset={offset}&limit={limit}` - a page of an address's transactions
//! 3. `/blocks/{millis}?format=json` - blocks mined on a day

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use super::{BlockSource, RawAddress, RawBlock};
use crate::config::EnergyscanConfig;
use crate::errors::UpstreamError;

/// HTTP client for the blockchain.info API
///
/// Requests carry the configured timeout, so a hung upstream call eventually
/// fails instead of occupying a concurrency slot forever.
///
/// # Examples
///
/// ```rust,ignore
/// use energyscan::{BlockchainInfoClient, BlockSource, EnergyscanConfig};
///
/// let client = BlockchainInfoClient::new(&EnergyscanConfig::default())?;
/// let block = client.raw_block("00000000000000000000...").await?;
/// println!("{} transactions", block.tx.len());
/// ```
#[derive(Debug, Clone)]
pub struct BlockchainInfoClient {
    client: Client,
    base_url: Url,
}

impl BlockchainInfoClient {
    /// Build a client from configuration
    pub fn new(config: &EnergyscanConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| UpstreamError::transport(config.upstream_url.as_str(), e))?;

        Ok(Self {
            client,
            base_url: config.upstream_url.clone(),
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base URL path, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn raw_block_url(&self, block_hash: &str) -> Url {
        self.endpoint(&["rawblock", block_hash])
    }

    fn raw_address_url(&self, address: &str, offset: usize, limit: usize) -> Url {
        let mut url = self.endpoint(&["rawaddr", address]);
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string());
        url
    }

    fn blocks_for_date_url(&self, date_millis: i64) -> Url {
        let mut url = self.endpoint(&["blocks", &date_millis.to_string()]);
        url.query_pairs_mut().append_pair("format", "json");
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, UpstreamError> {
        let endpoint = url.path().to_string();
        debug!(url = %url, "Upstream request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::status(endpoint, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::transport(&endpoint, e))?;
        trace!(endpoint = %endpoint, bytes = body.len(), "Upstream response");

        serde_json::from_slice(&body).map_err(|e| UpstreamError::decode(endpoint, e))
    }
}

#[async_trait]
impl BlockSource for BlockchainInfoClient {
    async fn raw_block(&self, block_hash: &str) -> Result<RawBlock, UpstreamError> {
        self.get_json(self.raw_block_url(block_hash)).await
    }

    async fn raw_address(
        &self,
        address: &str,
        offset: usize,
        limit: usize,
    ) -> Result<RawAddress, UpstreamError> {
        self.get_json(self.raw_address_url(address, offset, limit))
            .await
    }

    async fn blocks_for_date(&self, date_millis: i64) -> Result<serde_json::Value, UpstreamError> {
        self.get_json(self.blocks_for_date_url(date_millis)).await
    }
}
