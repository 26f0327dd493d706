//! In-process adapters for the claims reporting ports
//!
//! Database-backed adapters live in `infra_db`.

pub mod in_memory;

pub use in_memory::{InMemoryClaimsSnapshot, CollectingSink};
