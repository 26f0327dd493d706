//! Per-claim timeline projection and day gaps

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use core_kernel::optional_day_gap;
use crate::claim::Claim;
use crate::reserve::ReserveIndex;
use crate::underwriting::ClaimCategory;

/// Flat view of a claim's milestones plus the dates derived from its transactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimTimeline {
    pub claim_identifier: String,
    pub incident_date: Option<NaiveDateTime>,
    pub report_received_date: Option<NaiveDateTime>,
    pub initiated_date: Option<NaiveDateTime>,
    pub finalized_date: Option<NaiveDateTime>,
    pub first_reserve_date: Option<NaiveDateTime>,
    pub first_payment_date: Option<NaiveDateTime>,
    pub category: ClaimCategory,
    /// Empty when the underwriting period or policy link is missing
    pub policy_identifier: String,
}

impl ClaimTimeline {
    /// Projects a claim against the transaction index
    pub fn project(claim: &Claim, index: &ReserveIndex) -> Self {
        let first = index.first_dates(&claim.claim_id);

        Self {
            claim_identifier: claim.claim_identifier.clone(),
            incident_date: claim.incident_date,
            report_received_date: claim.report_received,
            initiated_date: claim.initiated_date,
            finalized_date: claim.finalized_date,
            first_reserve_date: first.first_reserve,
            first_payment_date: first.first_payment,
            category: claim.category(),
            policy_identifier: claim.policy_identifier().to_string(),
        }
    }

    /// The five reaction gaps of this timeline
    ///
    /// Every gap is absent when either of its ends is absent.
    pub fn gaps(&self) -> ReactionGaps {
        ReactionGaps {
            incident_to_received_days: optional_day_gap(self.incident_date, self.report_received_date),
            received_to_initiated_days: optional_day_gap(self.report_received_date, self.initiated_date),
            initiated_to_first_reserve_days: optional_day_gap(self.initiated_date, self.first_reserve_date),
            initiated_to_first_payment_days: optional_day_gap(self.initiated_date, self.first_payment_date),
            initiated_to_finalized_days: optional_day_gap(self.initiated_date, self.finalized_date),
        }
    }
}

/// Day gaps between the milestones of one claim
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionGaps {
    pub incident_to_received_days: Option<i64>,
    pub received_to_initiated_days: Option<i64>,
    pub initiated_to_first_reserve_days: Option<i64>,
    pub initiated_to_first_payment_days: Option<i64>,
    pub initiated_to_finalized_days: Option<i64>,
}

impl ReactionGaps {
    /// Gaps in fixed column order, for aggregation
    pub fn as_array(&self) -> [Option<i64>; 5] {
        [
            self.incident_to_received_days,
            self.received_to_initiated_days,
            self.initiated_to_first_reserve_days,
            self.initiated_to_first_payment_days,
            self.initiated_to_finalized_days,
        ]
    }
}

/// Per-claim detail row: the timeline together with its gaps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReactionRow {
    #[serde(flatten)]
    pub timeline: ClaimTimeline,
    #[serde(flatten)]
    pub gaps: ReactionGaps,
}

impl From<ClaimTimeline> for ClaimReactionRow {
    fn from(timeline: ClaimTimeline) -> Self {
        let gaps = timeline.gaps();
        Self { timeline, gaps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::reserve::{ReserveTransaction, TransactionCategories};
    use crate::underwriting::{Policy, UnderwritingPeriod};

    fn d(month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap().and_hms_opt(14, 0, 0).unwrap()
    }

    #[test]
    fn test_projection_copies_milestones_and_resolves_chain() {
        let mut claim = Claim::new("CL001", "CI001");
        claim.incident_date = Some(d(1, 1));
        claim.report_received = Some(d(1, 3));
        claim.underwriting_period = Some(
            UnderwritingPeriod::new()
                .with_policy_numbers(None, None, Some("PN3"))
                .with_policy(Policy::new("POL777")),
        );

        let timeline = ClaimTimeline::project(&claim, &ReserveIndex::default());

        assert_eq!(timeline.claim_identifier, "CI001");
        assert_eq!(timeline.report_received_date, Some(d(1, 3)));
        assert_eq!(timeline.category, ClaimCategory::Type3);
        assert_eq!(timeline.policy_identifier, "POL777");
        assert_eq!(timeline.first_reserve_date, None);
    }

    #[test]
    fn test_initiated_gaps_absent_without_targets() {
        let mut claim = Claim::new("CL001", "CI001");
        claim.initiated_date = Some(d(2, 1));

        let gaps = ClaimTimeline::project(&claim, &ReserveIndex::default()).gaps();

        assert_eq!(gaps.initiated_to_first_reserve_days, None);
        assert_eq!(gaps.initiated_to_first_payment_days, None);
        assert_eq!(gaps.initiated_to_finalized_days, None);
    }

    #[test]
    fn test_gaps_use_derived_dates() {
        let mut claim = Claim::new("CL001", "CI001");
        claim.initiated_date = Some(d(2, 1));
        let txs = vec![
            ReserveTransaction::new("CL001", "XYZ", d(2, 4)),
            ReserveTransaction::new("CL001", "EFG", d(2, 11)),
        ];
        let index = ReserveIndex::build(&txs, &TransactionCategories::default());

        let row = ClaimReactionRow::from(ClaimTimeline::project(&claim, &index));

        assert_eq!(row.gaps.initiated_to_first_reserve_days, Some(3));
        assert_eq!(row.gaps.initiated_to_first_payment_days, Some(10));
    }
}
