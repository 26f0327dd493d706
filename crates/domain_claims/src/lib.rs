//! Claims Reaction Reporting Domain
//!
//! This crate computes how quickly claims move through their milestones and
//! averages those timings per month of incident.
//!
//! # Pipeline
//!
//! ```text
//! claims + reserve transactions
//!     -> ClaimTimeline        (stored milestones + first reserve/payment dates)
//!     -> ClaimReactionRow     (five day gaps)
//!     -> MonthlyReactionAverages (grouped by incident year/month)
//!     -> ReportSink
//! ```
//!
//! Reserve transactions are read once and indexed by claim id, so the first
//! reserve and first payment lookups never go back to the store per claim.

pub mod claim;
pub mod underwriting;
pub mod reserve;
pub mod timeline;
pub mod aggregation;
pub mod report;
pub mod ports;
pub mod adapters;
pub mod error;

pub use claim::Claim;
pub use underwriting::{UnderwritingPeriod, Policy, ClaimCategory};
pub use reserve::{ReserveTransaction, ReserveIndex, TransactionCategories};
pub use timeline::{ClaimTimeline, ReactionGaps, ClaimReactionRow};
pub use aggregation::{MissingIncidentPolicy, MonthlyReactionAverages, MonthlyAggregation};
pub use report::{ClaimTimelineAggregator, ClaimsReactionReport, ReportSummary, ClaimsReportService, ReportOutcome};
pub use ports::{ClaimsSnapshotPort, ReportSink};
pub use error::ReportError;
