//! Repository implementations for the claims snapshot
//!
//! Repositories encapsulate SQL and map database rows onto domain records.
//! Queries are checked at runtime (`sqlx::query_as`) so the crate builds
//! without a live database.

pub mod claims;

pub use claims::PostgresClaimsSnapshotRepository;
