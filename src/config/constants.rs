// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed domain constants
//!
//! This module centralizes the magic numbers of the energy pipeline: the
//! bytes-to-energy factor, upstream paging limits, concurrency caps, and the
//! cache key namespaces.

/// Energy units attributed to every byte of block or transaction data
pub const ENERGY_COST_PER_BYTE: f64 = 4.56;

/// Upstream data provider defaults
pub mod upstream {
    /// Public blockchain.info REST endpoint
    pub const DEFAULT_BASE_URL: &str = "https://blockchain.info";

    /// Largest page the `rawaddr` endpoint will serve
    pub const ADDRESS_PAGE_SIZE: usize = 50;

    /// Default per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
}

/// GraphQL argument defaults
pub mod query {
    /// Transactions returned per block page when `limit` is omitted or null
    pub const DEFAULT_BLOCK_PAGE_LIMIT: usize = 50;
}

/// Redis connection bounds
pub mod redis {
    /// Upper bound on establishing the initial connection, in milliseconds
    pub const CONNECT_TIMEOUT_MS: u64 = 2_000;

    /// Reconnect attempts the connection manager makes before failing a command
    pub const RECONNECT_RETRIES: usize = 2;
}

/// In-flight limits for the aggregator fan-outs
pub mod concurrency {
    /// Address pages are fetched strictly one after another
    pub const ADDRESS_PAGES: usize = 1;

    /// Days processed at once by the per-day rollup
    pub const DAYS: usize = 5;

    /// Block lookups in flight while summing a day's energy
    pub const BLOCKS: usize = 20;
}

/// Cache key prefixes, one per entity type
pub mod keys {
    pub const BLOCK: &str = "block";
    pub const ADDRESS: &str = "address";
    pub const BLOCKS_BY_DATE: &str = "blocksByDate";
    pub const TOTAL_ENERGY_CONSUMPTION: &str = "totalEnergyConsumption";
}

/// Milliseconds in one UTC day
pub const MILLIS_PER_DAY: i64 = 86_400_000;
