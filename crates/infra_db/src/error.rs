//! Database error types
//!
//! Errors raised while reading the snapshot, and their mapping onto the
//! port error the domain understands.

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A row could not be decoded into a record
    #[error("Row decoding failed: {0}")]
    DecodeFailed(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Generic SQL error
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Classifies a SQLx error by what went wrong rather than where
    pub fn classify(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => DatabaseError::PoolExhausted,
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => DatabaseError::ConnectionFailed(error.to_string()),
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_) => DatabaseError::DecodeFailed(error.to_string()),
            sqlx::Error::Database(db_err) => DatabaseError::QueryFailed(db_err.message().to_string()),
            _ => DatabaseError::SqlError(error),
        }
    }
}

impl From<DatabaseError> for PortError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted => PortError::Connection {
                message: error.to_string(),
                source: Some(Box::new(error)),
            },
            DatabaseError::DecodeFailed(message) => PortError::Transformation { message },
            other => PortError::Query {
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_connection_error() {
        let error = DatabaseError::classify(sqlx::Error::PoolTimedOut);
        assert!(matches!(error, DatabaseError::PoolExhausted));

        let port: PortError = error.into();
        assert!(matches!(port, PortError::Connection { source: Some(_), .. }));
    }

    #[test]
    fn test_missing_column_maps_to_transformation() {
        let error = DatabaseError::classify(sqlx::Error::ColumnNotFound("incident_date".to_string()));
        let port: PortError = error.into();

        assert!(matches!(port, PortError::Transformation { ref message } if message.contains("incident_date")));
    }

    #[test]
    fn test_query_failure_keeps_message() {
        let port: PortError = DatabaseError::QueryFailed("relation \"claims\" does not exist".into()).into();
        assert!(port.to_string().contains("relation \"claims\" does not exist"));
    }
}
