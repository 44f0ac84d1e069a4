// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Counters for failures that batch operations swallow

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Running count of swallowed batch failures
///
/// Batch sub-units turn failures into an empty page or a zero so the caller
/// never sees them. Each such failure is logged and counted here.
#[derive(Debug, Default)]
pub struct FailureStats {
    address_pages: AtomicU64,
    blocks: AtomicU64,
    days: AtomicU64,
}

impl FailureStats {
    pub(crate) fn record_address_page(&self) {
        self.address_pages.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_block(&self) {
        self.blocks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_day(&self) {
        self.days.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters
    pub fn snapshot(&self) -> FailureCounts {
        FailureCounts {
            address_pages: self.address_pages.load(Ordering::Relaxed),
            blocks: self.blocks.load(Ordering::Relaxed),
            days: self.days.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of [`FailureStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureCounts {
    /// Address pages that contributed no transactions
    pub address_pages: u64,
    /// Blocks that contributed zero energy
    pub blocks: u64,
    /// Days recorded as zero
    pub days: u64,
}

impl FailureCounts {
    pub fn total(&self) -> u64 {
        self.address_pages + self.blocks + self.days
    }
}

impl fmt::Display for FailureCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "address_pages={}, blocks={}, days={}",
            self.address_pages, self.blocks, self.days
        )
    }
}
