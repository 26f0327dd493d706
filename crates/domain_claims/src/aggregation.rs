//! Monthly aggregation of claim reaction gaps
//!
//! Rows are grouped by the calendar year and month of the incident date.
//! Each gap is averaged over the claims where it is present; a group where a
//! gap is absent for every claim reports an absent average rather than zero.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

use core_kernel::YearMonth;
use crate::error::ReportError;
use crate::timeline::ClaimReactionRow;

/// What to do with a claim that has no incident date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingIncidentPolicy {
    /// Leave the claim out of every month and record it as skipped
    #[default]
    Skip,
    /// Fail the aggregation
    Reject,
}

impl fmt::Display for MissingIncidentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingIncidentPolicy::Skip => write!(f, "skip"),
            MissingIncidentPolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Averages of the five reaction gaps for one incident month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReactionAverages {
    pub incident_to_received_days_avg: Option<f64>,
    pub received_to_initiated_days_avg: Option<f64>,
    pub initiated_to_first_reserve_days_avg: Option<f64>,
    pub initiated_to_first_payment_days_avg: Option<f64>,
    pub initiated_to_finalized_days_avg: Option<f64>,
    pub year: i32,
    pub month: u32,
    /// Display anchor: third day of the month at 01:01:01
    pub date: NaiveDateTime,
    pub claim_count: usize,
}

/// Result of grouping: the monthly rows plus the claims that could not be grouped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyAggregation {
    pub rows: Vec<MonthlyReactionAverages>,
    pub skipped_claims: Vec<String>,
}

/// Running sum and count of present values
#[derive(Debug, Clone, Copy, Default)]
struct Average {
    sum: i64,
    count: u32,
}

impl Average {
    fn push(&mut self, value: Option<i64>) {
        if let Some(value) = value {
            self.sum += value;
            self.count += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum as f64 / f64::from(self.count))
    }
}

#[derive(Debug, Default)]
struct MonthAccumulator {
    gaps: [Average; 5],
    claims: usize,
}

impl MonthAccumulator {
    fn push(&mut self, row: &ClaimReactionRow) {
        for (avg, value) in self.gaps.iter_mut().zip(row.gaps.as_array()) {
            avg.push(value);
        }
        self.claims += 1;
    }

    fn finish(self, key: YearMonth) -> MonthlyReactionAverages {
        let [a, b, c, d, e] = self.gaps;
        MonthlyReactionAverages {
            incident_to_received_days_avg: a.value(),
            received_to_initiated_days_avg: b.value(),
            initiated_to_first_reserve_days_avg: c.value(),
            initiated_to_first_payment_days_avg: d.value(),
            initiated_to_finalized_days_avg: e.value(),
            year: key.year(),
            month: key.month(),
            date: key.anchor(),
            claim_count: self.claims,
        }
    }
}

/// Groups per-claim rows by incident month, ascending by year then month
pub fn aggregate_monthly(
    rows: &[ClaimReactionRow],
    policy: MissingIncidentPolicy,
) -> Result<MonthlyAggregation, ReportError> {
    let mut groups: BTreeMap<YearMonth, MonthAccumulator> = BTreeMap::new();
    let mut skipped_claims = Vec::new();

    for row in rows {
        let Some(incident) = row.timeline.incident_date else {
            match policy {
                MissingIncidentPolicy::Skip => {
                    warn!(
                        claim = %row.timeline.claim_identifier,
                        "Claim has no incident date, leaving it out of monthly averages"
                    );
                    skipped_claims.push(row.timeline.claim_identifier.clone());
                    continue;
                }
                MissingIncidentPolicy::Reject => {
                    return Err(ReportError::missing_incident_date(&row.timeline.claim_identifier));
                }
            }
        };

        groups.entry(YearMonth::of(incident)).or_default().push(row);
    }

    debug!(months = groups.len(), skipped = skipped_claims.len(), "Grouped claims by incident month");

    let rows = groups
        .into_iter()
        .map(|(key, acc)| acc.finish(key))
        .collect();

    Ok(MonthlyAggregation { rows, skipped_claims })
}
