//! Claims reporting errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur while producing a claims reaction report
#[derive(Debug, Error)]
pub enum ReportError {
    /// The snapshot could not be read from the store
    #[error("Failed to read claims snapshot: {0}")]
    Snapshot(#[from] PortError),

    /// A claim without an incident date reached monthly grouping under the reject policy
    #[error("Claim {claim_identifier} has no incident date and cannot be grouped by month")]
    MissingIncidentDate { claim_identifier: String },
}

impl ReportError {
    pub fn missing_incident_date(claim_identifier: impl Into<String>) -> Self {
        ReportError::MissingIncidentDate {
            claim_identifier: claim_identifier.into(),
        }
    }

    /// Returns true if the failure came from the data source rather than the data
    pub fn is_snapshot_failure(&self) -> bool {
        matches!(self, ReportError::Snapshot(_))
    }
}
