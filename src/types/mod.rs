// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Domain types shared by the aggregator, the cache and the query layer
//!
//! - [`Transaction`]: a transaction hash paired with its derived energy cost
//! - [`Block`]: the canonical cached shape under `block:<hash>`
//! - [`BlockRef`]: a block hash as listed by the blocks-for-date endpoint
//! - [`AddressTransactions`]: the cached transaction set of an address
//! - [`TimestampMillis`]: epoch milliseconds

mod block;
mod time;

pub use block::{AddressTransactions, Block, BlockRef, Transaction};
pub use time::TimestampMillis;
