//! Custom Test Assertions
//!
//! Assertion helpers for report rows that print the month being checked.

use domain_claims::{ClaimsReactionReport, MonthlyReactionAverages};

const TOLERANCE: f64 = 1e-9;

/// Asserts that an optional average equals the expected value within floating point tolerance
pub fn assert_average_eq(actual: Option<f64>, expected: Option<f64>, what: &str) {
    match (actual, expected) {
        (None, None) => {}
        (Some(a), Some(e)) => assert!(
            (a - e).abs() <= TOLERANCE,
            "{}: expected average {}, got {}",
            what,
            e,
            a
        ),
        _ => panic!("{}: expected {:?}, got {:?}", what, expected, actual),
    }
}

/// Finds the monthly row for a year and month, panicking with the available keys if absent
pub fn month_row(report: &ClaimsReactionReport, year: i32, month: u32) -> &MonthlyReactionAverages {
    report
        .monthly
        .iter()
        .find(|r| r.year == year && r.month == month)
        .unwrap_or_else(|| {
            let keys: Vec<String> = report
                .monthly
                .iter()
                .map(|r| format!("{}-{:02}", r.year, r.month))
                .collect();
            panic!("No row for {}-{:02}; have {:?}", year, month, keys)
        })
}

/// Asserts the five averages of a monthly row, in column order
pub fn assert_month_averages(row: &MonthlyReactionAverages, expected: [Option<f64>; 5]) {
    let label = format!("{}-{:02}", row.year, row.month);
    let actual = [
        row.incident_to_received_days_avg,
        row.received_to_initiated_days_avg,
        row.initiated_to_first_reserve_days_avg,
        row.initiated_to_first_payment_days_avg,
        row.initiated_to_finalized_days_avg,
    ];
    let names = [
        "incident->received",
        "received->initiated",
        "initiated->first reserve",
        "initiated->first payment",
        "initiated->finalized",
    ];

    for ((a, e), name) in actual.into_iter().zip(expected).zip(names) {
        assert_average_eq(a, e, &format!("{} {}", label, name));
    }
}

/// Asserts that monthly rows are strictly ascending by (year, month)
pub fn assert_months_ascending(report: &ClaimsReactionReport) {
    for pair in report.monthly.windows(2) {
        assert!(
            (pair[0].year, pair[0].month) < (pair[1].year, pair[1].month),
            "Months out of order: {}-{:02} before {}-{:02}",
            pair[0].year,
            pair[0].month,
            pair[1].year,
            pair[1].month
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_eq_tolerates_rounding() {
        assert_average_eq(Some(0.1 + 0.2), Some(0.3), "sum");
        assert_average_eq(None, None, "absent");
    }

    #[test]
    #[should_panic(expected = "expected None")]
    fn test_average_eq_rejects_zero_for_absent() {
        assert_average_eq(Some(0.0), None, "absent");
    }
}
