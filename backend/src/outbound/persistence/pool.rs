//! Async connection pool for the PostgreSQL persistence adapters.
//!
//! Wraps `diesel-async`'s `bb8` pool behind a small handle the repositories
//! share. Sizing and checkout timeout come from the environment at bootstrap;
//! unparseable overrides are logged and ignored rather than refusing to start.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::warn;

const DEFAULT_MAX_SIZE: u32 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Sizing and timeout settings for [`DbPool`].
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Configuration with default sizing: 10 connections, 30 second checkout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            connection_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Configuration with sizing read from the environment.
    ///
    /// `DATABASE_POOL_SIZE` overrides the connection count and
    /// `DATABASE_POOL_TIMEOUT_SECS` the checkout timeout; values that do not
    /// parse fall back to the defaults with a warning.
    pub fn from_env(database_url: impl Into<String>) -> Self {
        let mut config = Self::new(database_url);
        if let Some(size) = env_override::<u32>("DATABASE_POOL_SIZE") {
            config.max_size = size;
        }
        if let Some(secs) = env_override::<u64>("DATABASE_POOL_TIMEOUT_SECS") {
            config.connection_timeout = Duration::from_secs(secs);
        }
        config
    }
}

fn env_override<T: std::str::FromStr>(name: &str) -> Option<T> {
    parse_override(name, std::env::var(name).ok())
}

fn parse_override<T: std::str::FromStr>(name: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(name, value = %raw, "ignoring unparseable pool override");
            None
        }
    }
}

/// Async connection pool for PostgreSQL via Diesel.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Create a new connection pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if the pool cannot be constructed (e.g.,
    /// invalid database URL or connection failure).
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if a connection cannot be obtained within
    /// the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_defaults_to_ten_connections_and_thirty_seconds() {
        let config = PoolConfig::new("postgres://localhost/showcase");

        assert_eq!(config.database_url, "postgres://localhost/showcase");
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
        assert_eq!(config.connection_timeout, DEFAULT_TIMEOUT);
    }

    #[rstest]
    #[case::present(Some("25".to_owned()), Some(25))]
    #[case::absent(None, None)]
    #[case::not_a_number(Some("plenty".to_owned()), None)]
    #[case::negative(Some("-3".to_owned()), None)]
    fn overrides_apply_only_when_they_parse(
        #[case] raw: Option<String>,
        #[case] expected: Option<u32>,
    ) {
        assert_eq!(parse_override::<u32>("DATABASE_POOL_SIZE", raw), expected);
    }

    #[rstest]
    fn pool_errors_carry_their_cause() {
        let checkout = PoolError::checkout("connection refused");
        let build = PoolError::build("invalid URL");

        assert!(checkout.to_string().contains("connection refused"));
        assert!(build.to_string().contains("invalid URL"));
    }
}
