// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block and transaction shapes as computed and cached by the aggregator

use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use super::TimestampMillis;
use crate::energy::energy_cost;
use crate::upstream::{RawBlock, RawTransaction};

/// A transaction with its derived energy cost
///
/// Serialized with camelCase field names, which is also the wire shape of the
/// GraphQL `Transaction` type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction hash
    pub hash: String,
    /// `size * 4.56` over the transaction's byte size
    pub energy_cost: f64,
}

impl From<RawTransaction> for Transaction {
    fn from(tx: RawTransaction) -> Self {
        Self {
            energy_cost: energy_cost(tx.size as f64),
            hash: tx.hash,
        }
    }
}

/// A block with per-transaction energy costs
///
/// This is the only shape ever written under a `block:<hash>` key. Both the
/// per-transaction listing and the whole-block energy total read it back, the
/// latter through [`size`](Self::size).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub hash: String,
    /// Block height
    pub index: u64,
    /// Unix seconds
    pub time: u64,
    /// Whole-block byte size, absent when upstream omitted it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Transactions in upstream order
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Energy cost of the whole block, `0` when the size is unknown
    ///
    /// Computed over the block's byte size, not the sum of its transactions.
    pub fn energy_cost(&self) -> f64 {
        self.size.map_or(0.0, |size| energy_cost(size as f64))
    }

    /// The `[offset, offset + limit)` window of transactions
    ///
    /// Out-of-range windows yield an empty list.
    pub fn transaction_page(&self, limit: usize, offset: usize) -> Vec<Transaction> {
        self.transactions
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        Self {
            hash: raw.hash,
            index: raw.height,
            time: raw.time,
            size: raw.size,
            transactions: raw.tx.into_iter().map(Transaction::from).collect(),
        }
    }
}

/// A block listed for a day; only the hash is consumed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRef {
    pub hash: String,
}

impl BlockRef {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }
}

/// Every transaction of an address, as cached under `address:<addr>`
///
/// The capture `timestamp` is stored but never consulted: address entries do
/// not expire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressTransactions {
    pub transactions: Vec<Transaction>,
    pub timestamp: TimestampMillis,
}

impl AddressTransactions {
    /// Wraps `transactions` with the current time
    pub fn captured_now(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            timestamp: TimestampMillis::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block_with(n: usize) -> Block {
        Block {
            hash: "abc".to_string(),
            index: 1,
            time: 1_700_000_000,
            size: Some(1_000),
            transactions: (0..n)
                .map(|i| Transaction {
                    hash: format!("t{i}"),
                    energy_cost: i as f64,
                })
                .collect(),
        }
    }

    #[test]
    fn test_transaction_page_middle() {
        let page = block_with(5).transaction_page(2, 1);
        let hashes: Vec<_> = page.iter().map(|t| t.hash.as_str()).collect();
        assert_eq!(hashes, vec!["t1", "t2"]);
    }

    #[test]
    fn test_transaction_page_out_of_range_is_empty() {
        assert!(block_with(3).transaction_page(10, 5).is_empty());
        assert!(block_with(3).transaction_page(0, 0).is_empty());
    }

    #[test]
    fn test_transaction_page_truncated_at_end() {
        assert_eq!(block_with(3).transaction_page(50, 2).len(), 1);
    }

    #[test]
    fn test_block_from_raw_maps_energy() {
        let raw: RawBlock = serde_json::from_value(json!({
            "hash": "abc",
            "height": 800000,
            "time": 1690000000,
            "size": 1000,
            "tx": [{ "hash": "tx1", "size": 250 }]
        }))
        .unwrap();

        let block = Block::from(raw);
        assert_eq!(block.index, 800000);
        assert_eq!(block.size, Some(1000));
        assert_eq!(
            block.transactions,
            vec![Transaction {
                hash: "tx1".to_string(),
                energy_cost: 1140.0
            }]
        );
    }

    #[test]
    fn test_block_energy_without_size_is_zero() {
        let mut block = block_with(2);
        block.size = None;
        assert_eq!(block.energy_cost(), 0.0);
    }

    #[test]
    fn test_block_energy_uses_block_size() {
        assert_eq!(block_with(2).energy_cost(), 4560.0);
    }

    #[test]
    fn test_transaction_serializes_camel_case() {
        let tx = Transaction {
            hash: "h".to_string(),
            energy_cost: 1.5,
        };
        assert_eq!(
            serde_json::to_value(&tx).unwrap(),
            json!({ "hash": "h", "energyCost": 1.5 })
        );
    }

    #[test]
    fn test_cached_block_without_size_deserializes() {
        let block: Block = serde_json::from_value(json!({
            "hash": "abc",
            "index": 1,
            "time": 2,
            "transactions": []
        }))
        .unwrap();
        assert_eq!(block.size, None);
    }
}
