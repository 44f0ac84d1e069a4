// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for energyscan
//!
//! This module controls where upstream data comes from, how long a single
//! upstream request may take, which cache backend is used, and which port the
//! GraphQL API listens on.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use energyscan::EnergyscanConfig;
//!
//! let config = EnergyscanConfig::default();
//! assert_eq!(config.upstream_url.as_str(), "https://blockchain.info/");
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use energyscan::{CacheBackend, EnergyscanConfigBuilder};
//! use std::time::Duration;
//!
//! let config = EnergyscanConfigBuilder::new()
//!     .upstream_timeout(Duration::from_secs(5))
//!     .cache_backend(CacheBackend::Memory)
//!     .api_port(8080)
//!     .build();
//! assert_eq!(config.api_port, 8080);
//! ```
//!
//! # Environment
//!
//! [`EnergyscanConfig::from_env`] loads `.env` (if present) and reads
//! `UPSTREAM_URL`, `UPSTREAM_TIMEOUT_SECS`, `CACHE_BACKEND`, `REDIS_HOST`,
//! `REDIS_PORT`, `REDIS_PASSWORD`, `CACHE_MAX_ENTRIES` and `API_PORT`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::errors::ConfigError;

pub mod constants;

/// Which cache backend the aggregator writes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheBackend {
    /// Shared Redis store (production default)
    #[default]
    Redis,
    /// Process-local map, lost on exit
    Memory,
    /// Caching disabled, every lookup misses
    None,
}

impl FromStr for CacheBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" => Ok(CacheBackend::Memory),
            "none" | "noop" | "off" => Ok(CacheBackend::None),
            other => Err(ConfigError::invalid_value(
                "CACHE_BACKEND",
                other,
                "expected one of redis, memory, none",
            )),
        }
    }
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheBackend::Redis => "redis",
            CacheBackend::Memory => "memory",
            CacheBackend::None => "none",
        };
        f.write_str(name)
    }
}

/// Connection settings for the Redis cache store
#[derive(Clone, PartialEq, Eq)]
pub struct RedisConfig {
    /// Host name or IP address
    pub host: String,
    /// TCP port
    pub port: u16,
    /// Optional `AUTH` password
    pub password: Option<String>,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            password: None,
        }
    }
}

// Keeps the password out of logs
impl fmt::Debug for RedisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl RedisConfig {
    /// Builds the `redis://` connection URL
    ///
    /// # Example
    ///
    /// ```rust
    /// use energyscan::RedisConfig;
    ///
    /// let config = RedisConfig {
    ///     host: "cache.internal".to_string(),
    ///     port: 6380,
    ///     password: Some("s3cret".to_string()),
    /// };
    /// assert_eq!(
    ///     config.connection_url().unwrap().as_str(),
    ///     "redis://:s3cret@cache.internal:6380/"
    /// );
    /// ```
    pub fn connection_url(&self) -> Result<Url, ConfigError> {
        let raw = format!("redis://{}:{}/", self.host, self.port);
        let mut url = Url::parse(&raw)
            .map_err(|e| ConfigError::invalid_value("REDIS_HOST", &self.host, e.to_string()))?;

        if let Some(password) = &self.password {
            url.set_password(Some(password)).map_err(|()| {
                ConfigError::invalid_value("REDIS_PASSWORD", "<redacted>", "cannot be set on URL")
            })?;
        }

        Ok(url)
    }
}

/// Configuration for energyscan
///
/// Use [`EnergyscanConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct EnergyscanConfig {
    /// Base URL of the upstream REST provider
    /// Default: `https://blockchain.info`
    pub upstream_url: Url,

    /// Timeout applied to every upstream request
    /// Default: 30 seconds
    pub upstream_timeout: Duration,

    /// Cache backend selection
    /// Default: Redis
    pub cache_backend: CacheBackend,

    /// Redis connection settings, used when `cache_backend` is Redis
    pub redis: RedisConfig,

    /// Entry bound for the memory backend (`None` = unbounded)
    pub memory_max_entries: Option<usize>,

    /// Port the GraphQL API binds to
    /// Default: 3000
    pub api_port: u16,
}

impl Default for EnergyscanConfig {
    fn default() -> Self {
        Self {
            upstream_url: default_upstream_url(),
            upstream_timeout: Duration::from_secs(constants::upstream::DEFAULT_TIMEOUT_SECS),
            cache_backend: CacheBackend::default(),
            redis: RedisConfig::default(),
            memory_max_entries: None,
            api_port: 3000,
        }
    }
}

fn default_upstream_url() -> Url {
    Url::parse(constants::upstream::DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
}

impl EnergyscanConfig {
    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is loaded first when present.
    /// Unset variables keep their defaults; malformed ones are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// Separated from [`from_env`](Self::from_env) so tests do not have to
    /// mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = EnergyscanConfigBuilder::new();

        if let Some(raw) = lookup("UPSTREAM_URL") {
            let url = Url::parse(&raw)
                .map_err(|e| ConfigError::invalid_value("UPSTREAM_URL", &raw, e.to_string()))?;
            builder = builder.upstream_url(url);
        }

        if let Some(raw) = lookup("UPSTREAM_TIMEOUT_SECS") {
            let secs = parse_number::<u64>("UPSTREAM_TIMEOUT_SECS", &raw)?;
            builder = builder.upstream_timeout(Duration::from_secs(secs));
        }

        if let Some(raw) = lookup("CACHE_BACKEND") {
            builder = builder.cache_backend(raw.parse()?);
        }

        if let Some(host) = lookup("REDIS_HOST").filter(|h| !h.is_empty()) {
            builder = builder.redis_host(host);
        }

        if let Some(raw) = lookup("REDIS_PORT").filter(|p| !p.is_empty()) {
            builder = builder.redis_port(parse_number::<u16>("REDIS_PORT", &raw)?);
        }

        if let Some(password) = lookup("REDIS_PASSWORD").filter(|p| !p.is_empty()) {
            builder = builder.redis_password(password);
        }

        if let Some(raw) = lookup("CACHE_MAX_ENTRIES") {
            builder = builder.memory_max_entries(parse_number::<usize>("CACHE_MAX_ENTRIES", &raw)?);
        }

        if let Some(raw) = lookup("API_PORT") {
            builder = builder.api_port(parse_number::<u16>("API_PORT", &raw)?);
        }

        Ok(builder.build())
    }
}

fn parse_number<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::invalid_value(name, raw, e.to_string()))
}

/// Builder for [`EnergyscanConfig`]
///
/// # Example
///
/// ```rust
/// use energyscan::EnergyscanConfigBuilder;
///
/// let config = EnergyscanConfigBuilder::new()
///     .redis_host("redis.local")
///     .redis_port(6380)
///     .build();
/// assert_eq!(config.redis.port, 6380);
/// ```
#[derive(Debug, Default)]
pub struct EnergyscanConfigBuilder {
    config: EnergyscanConfig,
}

impl EnergyscanConfigBuilder {
    /// Create a new builder starting from defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the upstream base URL
    pub fn upstream_url(mut self, url: Url) -> Self {
        self.config.upstream_url = url;
        self
    }

    /// Set the per-request upstream timeout
    pub fn upstream_timeout(mut self, timeout: Duration) -> Self {
        self.config.upstream_timeout = timeout;
        self
    }

    /// Select the cache backend
    pub fn cache_backend(mut self, backend: CacheBackend) -> Self {
        self.config.cache_backend = backend;
        self
    }

    /// Set the Redis host
    pub fn redis_host(mut self, host: impl Into<String>) -> Self {
        self.config.redis.host = host.into();
        self
    }

    /// Set the Redis port
    pub fn redis_port(mut self, port: u16) -> Self {
        self.config.redis.port = port;
        self
    }

    /// Set the Redis password
    pub fn redis_password(mut self, password: impl Into<String>) -> Self {
        self.config.redis.password = Some(password.into());
        self
    }

    /// Bound the memory backend to `max` entries
    pub fn memory_max_entries(mut self, max: usize) -> Self {
        self.config.memory_max_entries = Some(max);
        self
    }

    /// Set the API listen port
    pub fn api_port(mut self, port: u16) -> Self {
        self.config.api_port = port;
        self
    }

    /// Build the configuration
    pub fn build(self) -> EnergyscanConfig {
        self.config
    }
}
