//! Claim record

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimRecordId;
use crate::underwriting::{ClaimCategory, UnderwritingPeriod};

/// A reported claim and its milestone dates
///
/// The underwriting period (and through it the policy) is resolved by the
/// snapshot adapter before the claim reaches the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Surrogate record identifier
    pub id: ClaimRecordId,
    /// Business claim key; reserve transactions reference this value
    pub claim_id: String,
    /// Identifier shown on reports
    pub claim_identifier: String,
    /// Date the incident happened
    pub incident_date: Option<NaiveDateTime>,
    /// Date the report of the claim was received
    pub report_received: Option<NaiveDateTime>,
    /// Date handling of the claim was initiated
    pub initiated_date: Option<NaiveDateTime>,
    /// Date the claim was finalized
    pub finalized_date: Option<NaiveDateTime>,
    /// Underwriting period the claim falls under
    pub underwriting_period: Option<UnderwritingPeriod>,
}

impl Claim {
    /// Creates a claim with no milestones and no underwriting period
    pub fn new(claim_id: impl Into<String>, claim_identifier: impl Into<String>) -> Self {
        Self {
            id: ClaimRecordId::generate(),
            claim_id: claim_id.into(),
            claim_identifier: claim_identifier.into(),
            incident_date: None,
            report_received: None,
            initiated_date: None,
            finalized_date: None,
            underwriting_period: None,
        }
    }

    /// Derived category; never stored
    pub fn category(&self) -> ClaimCategory {
        ClaimCategory::classify(self.underwriting_period.as_ref())
    }

    /// Policy identifier through underwriting period -> policy, empty when the chain is broken
    pub fn policy_identifier(&self) -> &str {
        self.underwriting_period
            .as_ref()
            .and_then(UnderwritingPeriod::policy_identifier)
            .unwrap_or("")
    }
}
