// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Millisecond timestamps

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Unix timestamp in milliseconds
///
/// Serialized as a bare number, which is the `timestamp` shape of cached
/// address entries.
///
/// # Examples
///
/// ```
/// use energyscan::TimestampMillis;
///
/// let earlier = TimestampMillis::from_millis(1_000);
/// assert!(earlier < TimestampMillis::now());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampMillis(i64);

impl TimestampMillis {
    /// Current wall-clock time
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }
}
