//! Date arithmetic shared by the period and recurrence calculators.

use std::ops::RangeInclusive;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Years for which every window and due-date step stays inside chrono's range.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

/// Whether period and recurrence arithmetic around `date` is in range.
pub fn is_supported(date: NaiveDate) -> bool {
    SUPPORTED_YEARS.contains(&date.year())
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable millisecond of `date` (23:59:59.999).
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date + Duration::days(1)) - Duration::milliseconds(1)
}

/// Drops sub-millisecond precision so instants line up with [`end_of_day`].
pub fn truncate_to_millis(instant: NaiveDateTime) -> NaiveDateTime {
    instant.trunc_subsecs(3)
}

/// Whole days from `from` to `to`, rounded toward positive infinity.
///
/// Negative when `to` precedes `from`.
pub fn ceil_days(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let millis = (to - from).num_milliseconds();
    -(-millis).div_euclid(MILLIS_PER_DAY)
}

/// Shifts `date` by a signed number of calendar months.
///
/// Days past the end of the target month clamp to its last day.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let step = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(step)
    } else {
        date.checked_sub_months(step)
    };
    shifted.unwrap_or(date)
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
    fn supported_range_excludes_calendar_extremes() {
        assert!(is_supported(NaiveDate::from_ymd_opt(1, 1, 1).unwrap()));
        assert!(is_supported(NaiveDate::from_ymd_opt(9999, 12, 31).unwrap()));
        assert!(!is_supported(NaiveDate::MAX));
        assert!(!is_supported(NaiveDate::MIN));
    }

    #[test]
    fn end_of_day_is_last_millisecond() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        let end = end_of_day(date);
        assert_eq!(end.date(), date);
        assert_eq!(end.to_string(), "2025-02-28 23:59:59.999");
    }

    #[test]
    fn ceil_days_rounds_up_in_both_directions() {
        let noon = at(2025, 3, 10, 12, 0);
        assert_eq!(ceil_days(noon, at(2025, 3, 12, 0, 0)), 2);
        assert_eq!(ceil_days(noon, at(2025, 3, 9, 0, 0)), -1);
        assert_eq!(ceil_days(noon, noon), 0);
        assert_eq!(ceil_days(noon, at(2025, 3, 11, 12, 0)), 1);
    }

    #[test]
    fn add_months_rolls_years_and_clamps() {
        let jan = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(add_months(jan, -1), NaiveDate::from_ymd_opt(2024, 12, 15).unwrap());
        assert_eq!(add_months(jan, 12), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        let end_of_jan = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(add_months(end_of_jan, 1), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn truncation_drops_nanoseconds() {
        let instant = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .unwrap();
        assert_eq!(truncate_to_millis(instant), end_of_day(instant.date()));
    }
}
