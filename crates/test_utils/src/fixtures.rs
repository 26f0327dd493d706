//! Pre-built Test Fixtures
//!
//! Fixed dates and ready-made snapshots. All dates hang off a fixed
//! reference instant so expectations never depend on the wall clock.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use domain_claims::adapters::InMemoryClaimsSnapshot;
use domain_claims::{Claim, Policy, ReserveTransaction, UnderwritingPeriod};

use crate::builders::ClaimBuilder;

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Reference "now" for relative dates (June 20, 2024, 10:15)
    pub fn reference_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 20)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap()
    }

    /// `days` calendar days before the reference instant, same time of day
    pub fn days_ago(days: i64) -> NaiveDateTime {
        Self::reference_now() - Duration::days(days)
    }

    /// A fixed date-time
    pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }
}

/// Fixture for snapshot test data
pub struct SnapshotFixtures;

impl SnapshotFixtures {
    /// The policy every classified fixture claim points at
    pub fn policy() -> Policy {
        Policy::new("POL001")
    }

    /// Underwriting period with only policy-number-1 set
    pub fn type1_period() -> UnderwritingPeriod {
        UnderwritingPeriod::new()
            .with_policy_numbers(Some("PN001"), None, None)
            .with_policy(Self::policy())
    }

    /// Three claims over two incident months, one claim without an incident date
    ///
    /// | claim | incident   | received   | initiated  | XYZ        | ABC/EFG    |
    /// |-------|------------|------------|------------|------------|------------|
    /// | CL100 | 2024-03-02 | 2024-03-07 | 2024-03-08 | 2024-03-10 | -          |
    /// | CL101 | 2024-03-20 | -          | 2024-03-25 | 2024-03-26 | 2024-03-30 |
    /// | CL102 | 2024-04-11 | 2024-04-12 | -          | 2024-04-15 | -          |
    /// | CL103 | -          | 2024-04-01 | 2024-04-02 | -          | -          |
    pub fn two_month_snapshot() -> InMemoryClaimsSnapshot {
        let at = TemporalFixtures::at;
        let claims: Vec<Claim> = vec![
            ClaimBuilder::new("CL100")
                .incident(at(2024, 3, 2, 9))
                .received(at(2024, 3, 7, 9))
                .initiated(at(2024, 3, 8, 16))
                .underwriting_period(Self::type1_period())
                .build(),
            ClaimBuilder::new("CL101")
                .incident(at(2024, 3, 20, 23))
                .initiated(at(2024, 3, 25, 1))
                .build(),
            ClaimBuilder::new("CL102")
                .incident(at(2024, 4, 11, 12))
                .received(at(2024, 4, 12, 12))
                .build(),
            ClaimBuilder::new("CL103")
                .received(at(2024, 4, 1, 8))
                .initiated(at(2024, 4, 2, 8))
                .build(),
        ];

        let transactions = vec![
            ReserveTransaction::new("CL100", "XYZ", at(2024, 3, 10, 11)),
            ReserveTransaction::new("CL101", "XYZ", at(2024, 3, 26, 11)),
            ReserveTransaction::new("CL101", "EFG", at(2024, 3, 30, 11)),
            ReserveTransaction::new("CL101", "ABC", at(2024, 4, 30, 11)),
            ReserveTransaction::new("CL102", "XYZ", at(2024, 4, 15, 11)),
        ];

        InMemoryClaimsSnapshot::new(claims, transactions)
    }
}
