//! Claims Reporting Ports
//!
//! The report reads a snapshot through [`ClaimsSnapshotPort`] and hands its
//! result to a [`ReportSink`]. Adapters:
//!
//! - **In-memory**: [`crate::adapters::InMemoryClaimsSnapshot`], for seeded
//!   demo data and tests
//! - **PostgreSQL**: `infra_db::repositories::PostgresClaimsSnapshotRepository`
//!
//! # Access pattern
//!
//! A report run calls each fetch exactly once. Implementations must return
//! the whole set in one bulk read; the aggregator resolves per-claim lookups
//! in memory.
//!
//! ```rust,ignore
//! let service = ClaimsReportService::new(Arc::new(snapshot), ClaimTimelineAggregator::default());
//! let outcome = service.execute(&mut sink).await;
//! ```

use async_trait::async_trait;

use core_kernel::{AdapterType, DomainPort, PortError};

use crate::claim::Claim;
use crate::report::ClaimsReactionReport;
use crate::reserve::ReserveTransaction;

/// Read-only access to the claims snapshot
#[async_trait]
pub trait ClaimsSnapshotPort: DomainPort {
    /// All claims, with underwriting period and policy already resolved
    async fn fetch_claims(&self) -> Result<Vec<Claim>, PortError>;

    /// All reserve transactions
    async fn fetch_reserve_transactions(&self) -> Result<Vec<ReserveTransaction>, PortError>;

    /// Kind of store behind this port, for logging
    fn adapter_type(&self) -> AdapterType;
}

/// Display sink receiving either a finished report or an error message
pub trait ReportSink {
    fn on_report(&mut self, report: &ClaimsReactionReport);

    fn on_error(&mut self, message: &str);
}
