//! Core Kernel - Foundational types and utilities for the claims reporting system
//!
//! This crate provides the fundamental building blocks used across all modules:
//! - Calendar arithmetic for claim timelines (day gaps, year-month grouping keys)
//! - Strongly-typed record identifiers
//! - Port abstractions shared by every data source adapter

pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use temporal::{day_gap, optional_day_gap, YearMonth, TemporalError};
pub use identifiers::{ClaimRecordId, ReserveTransactionId, UnderwritingPeriodId, PolicyId};
pub use ports::{PortError, DomainPort, AdapterType, RunContext};
pub use error::CoreError;
