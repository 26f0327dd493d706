//! Calendar arithmetic for claim timelines
//!
//! Milestone dates are zone-less calendar date-times. Two operations matter to
//! the reporting pipeline:
//! - Day gaps: the number of calendar-day boundaries between two date-times,
//!   ignoring the time of day (the semantics of SQL `DATEDIFF(day, a, b)`)
//! - Year-month keys: the grouping key for monthly aggregation, together with
//!   the fixed display anchor of each month

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use thiserror::Error;

/// Day of the month used for the display anchor of a [`YearMonth`]
pub const ANCHOR_DAY: u32 = 3;

/// Time of day used for the display anchor of a [`YearMonth`]
pub const ANCHOR_TIME: NaiveTime = match NaiveTime::from_hms_opt(1, 1, 1) {
    Some(time) => time,
    None => panic!("anchor time out of range"),
};

/// Errors related to calendar operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid year-month: {year}-{month:02}")]
    InvalidYearMonth { year: i32, month: u32 },
}

/// Returns the number of calendar-day boundaries crossed going from `from` to `to`
///
/// The time of day is ignored: 23:59 on one day to 00:01 on the next is one
/// day, while 00:01 to 23:59 on the same day is zero. The result is negative
/// when `to` falls on an earlier calendar day than `from`.
pub fn day_gap(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to.date() - from.date()).num_days()
}

/// Day gap between two optional date-times; absent when either end is absent
pub fn optional_day_gap(from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Option<i64> {
    match (from, to) {
        (Some(from), Some(to)) => Some(day_gap(from, to)),
        _ => None,
    }
}

/// A calendar (year, month) pair
///
/// Held as the month's anchor date, so every value names a real month and
/// ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// Creates a year-month, rejecting months outside 1..=12 and years chrono cannot represent
    pub fn new(year: i32, month: u32) -> Result<Self, TemporalError> {
        NaiveDate::from_ymd_opt(year, month, ANCHOR_DAY)
            .map(Self)
            .ok_or(TemporalError::InvalidYearMonth { year, month })
    }

    /// Extracts the year-month of a date-time
    pub fn of(timestamp: NaiveDateTime) -> Self {
        let date = timestamp.date();
        Self(date + Duration::days(i64::from(ANCHOR_DAY) - i64::from(date.day())))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// The display anchor for this month: day 3 at 01:01:01
    ///
    /// Only used to give each monthly row a plottable timestamp; it carries no
    /// computed meaning.
    pub fn anchor(&self) -> NaiveDateTime {
        self.0.and_time(ANCHOR_TIME)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl From<NaiveDateTime> for YearMonth {
    fn from(timestamp: NaiveDateTime) -> Self {
        Self::of(timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_day_gap_ignores_time_of_day() {
        assert_eq!(day_gap(at(2024, 3, 1, 23, 59), at(2024, 3, 2, 0, 1)), 1);
        assert_eq!(day_gap(at(2024, 3, 1, 0, 1), at(2024, 3, 1, 23, 59)), 0);
    }

    #[test]
    fn test_day_gap_is_negative_backwards() {
        assert_eq!(day_gap(at(2024, 3, 10, 8, 0), at(2024, 3, 7, 8, 0)), -3);
    }

    #[test]
    fn test_optional_day_gap_requires_both_ends() {
        let d = at(2024, 1, 1, 0, 0);
        assert_eq!(optional_day_gap(Some(d), None), None);
        assert_eq!(optional_day_gap(None, Some(d)), None);
        assert_eq!(optional_day_gap(Some(d), Some(d)), Some(0));
    }

    #[test]
    fn test_anchor_is_third_day_at_010101() {
        let ym = YearMonth::new(2024, 2).unwrap();
        assert_eq!(ym.anchor(), at(2024, 2, 3, 1, 1) + chrono::Duration::seconds(1));
    }

    #[test]
    fn test_year_month_rejects_month_thirteen() {
        assert_eq!(
            YearMonth::new(2024, 13),
            Err(TemporalError::InvalidYearMonth { year: 2024, month: 13 })
        );
    }

    #[test]
    fn test_of_early_and_late_days_land_on_same_month() {
        let first = YearMonth::of(at(2024, 2, 1, 0, 0));
        let last = YearMonth::of(at(2024, 2, 29, 23, 59));

        assert_eq!(first, last);
        assert_eq!((first.year(), first.month()), (2024, 2));
        assert_eq!(first.anchor(), YearMonth::new(2024, 2).unwrap().anchor());
    }

    #[test]
    fn test_year_month_ordering() {
        let mut months = vec![
            YearMonth::new(2024, 1).unwrap(),
            YearMonth::new(2023, 12).unwrap(),
            YearMonth::new(2024, 11).unwrap(),
        ];
        months.sort();
        assert_eq!(months[0].to_string(), "2023-12");
        assert_eq!(months[2].to_string(), "2024-11");
    }
}
