// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while talking to the upstream blockchain data provider.

/// Errors that can occur during a single upstream REST call.
///
/// Each variant names the endpoint that was being requested so log lines and
/// surfaced messages identify the failing call without extra context.
///
/// # Examples
///
/// ```rust
/// use energyscan::UpstreamError;
///
/// let error = UpstreamError::Status {
///     endpoint: "/rawblock/abc".to_string(),
///     status: 404,
/// };
/// assert_eq!(error.to_string(), "Upstream returned status 404 for /rawblock/abc");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The request never produced a response.
    ///
    /// Covers connection failures, DNS errors and request timeouts.
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        /// Endpoint path that was requested
        endpoint: String,
        /// The underlying client error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The provider answered with a non-success status code.
    #[error("Upstream returned status {status} for {endpoint}")]
    Status {
        /// Endpoint path that was requested
        endpoint: String,
        /// HTTP status code
        status: u16,
    },

    /// The response body could not be decoded into the expected payload.
    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        /// Endpoint path that was requested
        endpoint: String,
        /// The underlying decode error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl UpstreamError {
    /// Helper to create a `Transport` error from any error type.
    pub fn transport(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        UpstreamError::Transport {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `Status` error.
    pub fn status(endpoint: impl Into<String>, status: u16) -> Self {
        UpstreamError::Status {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Helper to create a `Decode` error from any error type.
    pub fn decode(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        UpstreamError::Decode {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }
}
