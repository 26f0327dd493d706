//! Tests for the calendar arithmetic used by claim timelines

use chrono::{Duration, NaiveDate, NaiveDateTime};
use core_kernel::temporal::{day_gap, optional_day_gap, YearMonth, ANCHOR_DAY};
use proptest::prelude::*;

fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
}

mod day_gaps {
    use super::*;

    #[test]
    fn test_equal_dates_yield_zero() {
        let d = midnight(2024, 5, 17);
        assert_eq!(day_gap(d, d), 0);
    }

    #[test]
    fn test_gap_crosses_month_and_leap_day() {
        assert_eq!(day_gap(midnight(2024, 2, 28), midnight(2024, 3, 1)), 2);
        assert_eq!(day_gap(midnight(2023, 2, 28), midnight(2023, 3, 1)), 1);
    }

    #[test]
    fn test_gap_crosses_year() {
        assert_eq!(day_gap(midnight(2023, 12, 31), midnight(2024, 1, 1)), 1);
    }

    #[test]
    fn test_less_than_a_day_across_midnight_counts_one() {
        let late = midnight(2024, 6, 1) + Duration::hours(23);
        let early = midnight(2024, 6, 2) + Duration::hours(1);
        assert_eq!(day_gap(late, early), 1);
    }

    #[test]
    fn test_optional_gap_absent_when_source_missing() {
        assert_eq!(optional_day_gap(None, Some(midnight(2024, 1, 1))), None);
    }
}

mod year_month {
    use super::*;

    #[test]
    fn test_of_extracts_calendar_fields() {
        let ym = YearMonth::of(midnight(2024, 9, 30) + Duration::hours(22));
        assert_eq!(ym, YearMonth::new(2024, 9).unwrap());
        assert_eq!((ym.year(), ym.month()), (2024, 9));
    }

    #[test]
    fn test_anchor_for_every_month() {
        for month in 1..=12 {
            let anchor = YearMonth::new(2025, month).unwrap().anchor();
            assert_eq!(anchor.date(), NaiveDate::from_ymd_opt(2025, month, ANCHOR_DAY).unwrap());
            assert_eq!(anchor.time().to_string(), "01:01:01");
        }
    }

    #[test]
    fn test_display_pads_month() {
        assert_eq!(YearMonth::new(2024, 3).unwrap().to_string(), "2024-03");
    }
}

proptest! {
    #[test]
    fn day_gap_matches_whole_day_offset(
        base_days in 0i64..20_000i64,
        offset in -2_000i64..2_000i64,
        from_secs in 0i64..86_400i64,
        to_secs in 0i64..86_400i64
    ) {
        let base = midnight(1990, 1, 1) + Duration::days(base_days);
        let from = base + Duration::seconds(from_secs);
        let to = base + Duration::days(offset) + Duration::seconds(to_secs);

        prop_assert_eq!(day_gap(from, to), offset);
    }

    #[test]
    fn day_gap_is_antisymmetric(
        a in 0i64..20_000i64,
        b in 0i64..20_000i64
    ) {
        let x = midnight(1990, 1, 1) + Duration::days(a);
        let y = midnight(1990, 1, 1) + Duration::days(b);

        prop_assert_eq!(day_gap(x, y), -day_gap(y, x));
    }
}
