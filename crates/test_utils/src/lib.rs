//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims reaction report test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built dates and snapshots
//! - `builders`: Builder patterns for claims and their transactions
//! - `database`: PostgreSQL test container with the snapshot schema
//! - `assertions`: Assertion helpers for report rows
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
