//! Port plumbing shared by the snapshot adapters
//!
//! The reporting domain reads its input through read-only port traits that
//! extend [`DomainPort`]. Adapters either hold records in memory or read them
//! from PostgreSQL; both report failures as [`PortError`].
//!
//! ```text
//!   report service ──> ClaimsSnapshotPort ──┬──> in-memory snapshot
//!                                            └──> PostgreSQL repository
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Failure reading from a snapshot source
#[derive(Debug, Error)]
pub enum PortError {
    /// The store could not be reached
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The store was reached but could not evaluate the read
    #[error("Query error: {message}")]
    Query {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Stored data could not be mapped onto the record shapes
    #[error("Transformation error: {message}")]
    Transformation { message: String },
}

impl PortError {
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        PortError::Query {
            message: message.into(),
            source: None,
        }
    }

    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }
}

/// Marker trait for all domain ports
///
/// Ports must be usable behind `Arc<dyn _>` from async code.
pub trait DomainPort: Send + Sync + 'static {}

/// Kind of store behind a port, as it appears in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterType {
    InMemory,
    Database,
}

impl fmt::Display for AdapterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AdapterType::InMemory => "in_memory",
            AdapterType::Database => "database",
        })
    }
}

/// Identity of one report run, attached to its log lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    pub run_id: Option<String>,
    /// Extra fields such as the data source; ordered so log output is stable
    pub labels: BTreeMap<String, String>,
}

impl RunContext {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: Some(run_id.into()),
            labels: BTreeMap::new(),
        }
    }

    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Run id for log fields, `-` for anonymous runs
    pub fn run_id(&self) -> &str {
        self.run_id.as_deref().unwrap_or("-")
    }

    /// Labels rendered as `key=value` pairs
    pub fn labels_display(&self) -> String {
        self.labels
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_query_message() {
        let error = PortError::query("subquery could not be translated");
        assert!(matches!(error, PortError::Query { source: None, .. }));
        assert_eq!(error.to_string(), "Query error: subquery could not be translated");
    }

    #[test]
    fn test_adapter_type_serde() {
        let json = serde_json::to_string(&AdapterType::InMemory).unwrap();
        assert_eq!(json, "\"in_memory\"");
        assert_eq!(AdapterType::Database.to_string(), "database");
    }

    #[test]
    fn test_run_context_labels_are_sorted() {
        let run = RunContext::new("run-1")
            .label("output", "table")
            .label("data_source", "seed");

        assert_eq!(run.run_id(), "run-1");
        assert_eq!(run.labels_display(), "data_source=seed output=table");
    }

    #[test]
    fn test_anonymous_run() {
        let run = RunContext::default();
        assert_eq!(run.run_id(), "-");
        assert_eq!(run.labels_display(), "");
    }
}
