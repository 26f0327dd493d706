//! Test Data Builders
//!
//! Builder patterns for constructing claims with only the milestones a test
//! cares about.

use chrono::NaiveDateTime;
use domain_claims::{Claim, Policy, UnderwritingPeriod};

/// Builder for constructing test claims
///
/// The claim identifier defaults to the claim id with `CL` replaced by `CI`,
/// mirroring how the seeded data pairs them.
pub struct ClaimBuilder {
    claim: Claim,
}

impl ClaimBuilder {
    /// Creates a builder for a claim with the given business claim id
    pub fn new(claim_id: &str) -> Self {
        let identifier = claim_id.replacen("CL", "CI", 1);
        Self {
            claim: Claim::new(claim_id, identifier),
        }
    }

    /// Sets the display identifier
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.claim.claim_identifier = identifier.into();
        self
    }

    /// Sets the incident date
    pub fn incident(mut self, date: NaiveDateTime) -> Self {
        self.claim.incident_date = Some(date);
        self
    }

    /// Sets the report received date
    pub fn received(mut self, date: NaiveDateTime) -> Self {
        self.claim.report_received = Some(date);
        self
    }

    /// Sets the initiated date
    pub fn initiated(mut self, date: NaiveDateTime) -> Self {
        self.claim.initiated_date = Some(date);
        self
    }

    /// Sets the finalized date
    pub fn finalized(mut self, date: NaiveDateTime) -> Self {
        self.claim.finalized_date = Some(date);
        self
    }

    /// Attaches an underwriting period
    pub fn underwriting_period(mut self, period: UnderwritingPeriod) -> Self {
        self.claim.underwriting_period = Some(period);
        self
    }

    /// Attaches an underwriting period with the given policy numbers and policy identifier
    pub fn classified(
        self,
        numbers: (Option<&str>, Option<&str>, Option<&str>),
        policy_identifier: Option<&str>,
    ) -> Self {
        let mut period = UnderwritingPeriod::new().with_policy_numbers(numbers.0, numbers.1, numbers.2);
        if let Some(identifier) = policy_identifier {
            period = period.with_policy(Policy::new(identifier));
        }
        self.underwriting_period(period)
    }

    /// Builds the claim
    pub fn build(self) -> Claim {
        self.claim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TemporalFixtures;
    use domain_claims::ClaimCategory;

    #[test]
    fn test_builder_derives_identifier() {
        let claim = ClaimBuilder::new("CL042").build();
        assert_eq!(claim.claim_identifier, "CI042");
        assert!(claim.incident_date.is_none());
    }

    #[test]
    fn test_builder_sets_milestones_and_chain() {
        let claim = ClaimBuilder::new("CL001")
            .incident(TemporalFixtures::days_ago(3))
            .finalized(TemporalFixtures::days_ago(1))
            .classified((None, None, Some("PN3")), Some("POL9"))
            .build();

        assert_eq!(claim.finalized_date, Some(TemporalFixtures::days_ago(1)));
        assert_eq!(claim.category(), ClaimCategory::Type3);
        assert_eq!(claim.policy_identifier(), "POL9");
    }
}
