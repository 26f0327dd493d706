//! Demo seed data
//!
//! One policy, one underwriting period, one claim and two reserve
//! transactions, dated relative to `now` so the demo always lands in a recent
//! month.

use chrono::{Duration, NaiveDateTime};

use domain_claims::adapters::InMemoryClaimsSnapshot;
use domain_claims::{Claim, Policy, ReserveTransaction, UnderwritingPeriod};

/// Builds the demo snapshot around `now`
pub fn demo_snapshot(now: NaiveDateTime) -> InMemoryClaimsSnapshot {
    let days_ago = |days: i64| now - Duration::days(days);

    let underwriting_period = UnderwritingPeriod::new()
        .with_policy_numbers(Some("PN001"), Some("PN001"), Some("PN003"))
        .with_policy(Policy::new("POL001"));

    let mut claim = Claim::new("CL001", "CI001");
    claim.incident_date = Some(days_ago(30));
    claim.report_received = Some(days_ago(28));
    claim.initiated_date = Some(days_ago(27));
    claim.finalized_date = Some(days_ago(5));
    claim.underwriting_period = Some(underwriting_period);

    InMemoryClaimsSnapshot::default()
        .with_claim(claim)
        .with_transaction(ReserveTransaction::new("CL001", "XYZ", days_ago(26)))
        .with_transaction(ReserveTransaction::new("CL001", "ABC", days_ago(25)))
}
