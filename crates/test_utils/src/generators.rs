//! Property-Based Test Generators
//!
//! Proptest strategies for snapshots that keep the record invariants: every
//! transaction points at a claim id that exists, and dates stay within a
//! window around the fixture reference instant.

use chrono::{Duration, NaiveDateTime};
use domain_claims::{Claim, ReserveTransaction, UnderwritingPeriod, Policy};
use proptest::prelude::*;

use crate::fixtures::TemporalFixtures;

/// Category tags, including one that matches neither reserves nor payments
pub const TAGS: [&str; 4] = ["XYZ", "ABC", "EFG", "QQQ"];

/// Strategy for a date within roughly two years before the reference instant
pub fn date_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..730, 0i64..86_400).prop_map(|(days, secs)| {
        TemporalFixtures::days_ago(days) - Duration::seconds(secs)
    })
}

/// Strategy for an optional date
pub fn optional_date_strategy() -> impl Strategy<Value = Option<NaiveDateTime>> {
    proptest::option::of(date_strategy())
}

/// Strategy for an optional policy number
fn policy_number_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("PN[0-9]{3}")
}

/// Strategy for an optional underwriting period with an optional policy
pub fn underwriting_period_strategy() -> impl Strategy<Value = Option<UnderwritingPeriod>> {
    proptest::option::of((
        policy_number_strategy(),
        policy_number_strategy(),
        policy_number_strategy(),
        proptest::option::of("POL[0-9]{3}"),
    ))
    .prop_map(|period| {
        period.map(|(n1, n2, n3, policy)| {
            let mut period = UnderwritingPeriod::new();
            period.policy_number_1 = n1;
            period.policy_number_2 = n2;
            period.policy_number_3 = n3;
            period.policy = policy.map(Policy::new);
            period
        })
    })
}

/// Strategy for a claim with the given business id
pub fn claim_strategy(claim_id: String) -> impl Strategy<Value = Claim> {
    (
        optional_date_strategy(),
        optional_date_strategy(),
        optional_date_strategy(),
        optional_date_strategy(),
        underwriting_period_strategy(),
    )
        .prop_map(move |(incident, received, initiated, finalized, period)| {
            let mut claim = Claim::new(claim_id.clone(), claim_id.replacen("CL", "CI", 1));
            claim.incident_date = incident;
            claim.report_received = received;
            claim.initiated_date = initiated;
            claim.finalized_date = finalized;
            claim.underwriting_period = period;
            claim
        })
}

/// Strategy for a whole snapshot of up to `max_claims` claims and their transactions
pub fn snapshot_strategy(max_claims: usize) -> impl Strategy<Value = (Vec<Claim>, Vec<ReserveTransaction>)> {
    (1..=max_claims.max(1))
        .prop_flat_map(|n| {
            let claims: Vec<_> = (0..n).map(|i| claim_strategy(format!("CL{:04}", i))).collect();
            let transactions = proptest::collection::vec(
                (0..n, 0..TAGS.len(), date_strategy()),
                0..n * 3,
            );
            (claims, transactions)
        })
        .prop_map(|(claims, raw)| {
            let transactions = raw
                .into_iter()
                .map(|(claim, tag, date)| {
                    ReserveTransaction::new(claims[claim].claim_id.clone(), TAGS[tag], date)
                })
                .collect();
            (claims, transactions)
        })
}
