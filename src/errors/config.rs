// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while reading configuration.

/// Errors that can occur while building an [`EnergyscanConfig`](crate::EnergyscanConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable or builder value could not be parsed.
    #[error("Invalid value {value:?} for {name}: {details}")]
    InvalidValue {
        /// Name of the setting (usually the environment variable)
        name: &'static str,
        /// The rejected raw value
        value: String,
        /// Why the value was rejected
        details: String,
    },
}

impl ConfigError {
    /// Create an `InvalidValue` error.
    pub fn invalid_value(
        name: &'static str,
        value: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            name,
            value: value.into(),
            details: details.into(),
        }
    }
}
