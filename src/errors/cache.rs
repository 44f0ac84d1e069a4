// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for cache backends.
//!
//! Cache errors are soft everywhere in the aggregator: a failed read is a miss
//! and a failed write is logged and dropped.

/// Errors that can occur while reading from or writing to a cache backend.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The backing store could not be reached or rejected the command.
    #[error("Cache store unavailable during {operation}: {source}")]
    Unavailable {
        /// Description of the operation that failed (e.g. "GET block:abc")
        operation: String,
        /// The underlying store error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A cached payload could not be serialized or deserialized.
    #[error("Cache serialization error for key {key}: {source}")]
    Serialization {
        /// The cache key involved
        key: String,
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    /// Create an `Unavailable` error from any store error.
    pub fn unavailable(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        CacheError::Unavailable {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Create a `Serialization` error for a key.
    pub fn serialization(key: impl Into<String>, source: serde_json::Error) -> Self {
        CacheError::Serialization {
            key: key.into(),
            source,
        }
    }
}
