//! Connection pool for snapshot reads
//!
//! A report run issues two bulk reads and exits, so the pool stays small and
//! connections are never kept idle for long.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;

/// Type alias for the PostgreSQL connection pool
pub type DatabasePool = PgPool;

/// Pool settings for the snapshot source
///
/// ```rust
/// use infra_db::DatabaseConfig;
///
/// let config = DatabaseConfig::new("postgres://report:secret@db/claims").max_connections(4);
/// assert_eq!(config.max_connections, 4);
/// assert_eq!(config.redacted_url(), "postgres://report:***@db/claims");
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// How long to wait for a connection before the read fails
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 2,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// The URL with any password masked, for log lines
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let Some((credentials, host)) = rest.rsplit_once('@') else {
            return self.url.clone();
        };
        match credentials.split_once(':') {
            Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
            None => self.url.clone(),
        }
    }
}

/// Opens the pool and checks that the database answers
///
/// # Errors
///
/// Returns `DatabaseError::ConnectionFailed` if no connection can be made
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!(
        url = %config.redacted_url(),
        max_connections = config.max_connections,
        "Opening claims database"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(Duration::from_secs(60))
        .connect(&config.url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_size_has_floor_of_one() {
        let config = DatabaseConfig::new("postgres://test").max_connections(0);
        assert_eq!(config.max_connections, 1);
        assert_eq!(DatabaseConfig::new("postgres://test").max_connections, 2);
    }

    #[test]
    fn test_redaction_leaves_urls_without_password() {
        assert_eq!(
            DatabaseConfig::new("postgres://localhost/claims").redacted_url(),
            "postgres://localhost/claims"
        );
        assert_eq!(
            DatabaseConfig::new("postgres://report@db/claims").redacted_url(),
            "postgres://report@db/claims"
        );
    }

    #[test]
    fn test_redaction_masks_password_containing_at_sign() {
        let config = DatabaseConfig::new("postgres://u:p@ss@db:5432/claims");
        assert_eq!(config.redacted_url(), "postgres://u:***@db:5432/claims");
    }
}
