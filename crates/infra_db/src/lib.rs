//! Infrastructure Database Layer
//!
//! PostgreSQL access for the claims reaction report using SQLx.
//!
//! # Access pattern
//!
//! The snapshot repository issues one bulk query per record set: claims are
//! read with their underwriting period and policy joined in, reserve
//! transactions are read whole. Nothing is queried per claim; first reserve
//! and first payment dates are resolved by the domain in memory.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig};
//! use infra_db::repositories::PostgresClaimsSnapshotRepository;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/claims")).await?;
//! let snapshot = PostgresClaimsSnapshotRepository::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;

pub use pool::{DatabasePool, create_pool, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::PostgresClaimsSnapshotRepository;

/// Schema of the snapshot tables, for bootstrapping test and demo databases
pub const SNAPSHOT_SCHEMA: &str = include_str!("../migrations/20240101_000001_claims_snapshot.sql");
