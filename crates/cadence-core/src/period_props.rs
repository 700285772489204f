//! Property-based tests for budget period windows.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use crate::calendar::add_months;
use crate::period::{BudgetPeriodConfig, PeriodCalculator};

/// Strategy for instants between 2000 and roughly 2054, at millisecond resolution.
fn instant() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..20_000, 0i64..86_400_000).prop_map(|(days, millis)| {
        let epoch = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        epoch + Duration::days(days) + Duration::milliseconds(millis)
    })
}

fn config_strategy() -> impl Strategy<Value = BudgetPeriodConfig> {
    prop_oneof![
        (0u8..=6).prop_map(|day| BudgetPeriodConfig::weekly(day).unwrap()),
        (1u8..=28).prop_map(|day| BudgetPeriodConfig::monthly(day).unwrap()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Weekly windows contain `now`, start on the configured weekday, and span seven days.
    #[test]
    fn prop_weekly_window_spans_seven_days(day in 0u8..=6, now in instant()) {
        let config = BudgetPeriodConfig::weekly(day).unwrap();
        let window = PeriodCalculator::compute_window(&config, now);

        prop_assert!(window.period_start <= now);
        prop_assert!(now <= window.period_end);
        prop_assert_eq!(window.length_days(), 7);
        prop_assert_eq!(
            window.period_start.date().weekday().num_days_from_sunday(),
            u32::from(day)
        );
    }

    /// Monthly windows start on the configured day and end the day before it recurs.
    #[test]
    fn prop_monthly_window_matches_start_day(day in 1u8..=28, now in instant()) {
        let config = BudgetPeriodConfig::monthly(day).unwrap();
        let window = PeriodCalculator::compute_window(&config, now);
        let start = window.period_start.date();

        prop_assert!(window.contains(now));
        prop_assert_eq!(start.day(), u32::from(day));
        prop_assert_eq!(window.period_end.date(), add_months(start, 1) - Duration::days(1));
    }

    #[test]
    fn prop_days_until_reset_is_positive(config in config_strategy(), now in instant()) {
        let window = PeriodCalculator::compute_window(&config, now);
        prop_assert!(window.days_until_reset >= 1);
        prop_assert!(window.days_until_reset <= window.length_days() + 1);
    }

    /// Advancing one day keeps the window or moves to exactly the next one.
    #[test]
    fn prop_windows_advance_whole_periods(config in config_strategy(), now in instant()) {
        let today = PeriodCalculator::compute_window(&config, now).bounds();
        let tomorrow = PeriodCalculator::compute_window(&config, now + Duration::days(1)).bounds();

        if tomorrow != today {
            prop_assert_eq!(tomorrow.start_date(), today.reset_date());
            prop_assert_eq!(tomorrow, PeriodCalculator::next_bounds(&config, &today));
        }
    }

    #[test]
    fn prop_previous_undoes_next(config in config_strategy(), now in instant()) {
        let bounds = PeriodCalculator::bounds_at(&config, now);
        let next = PeriodCalculator::next_bounds(&config, &bounds);
        prop_assert_eq!(PeriodCalculator::previous_bounds(&config, &next), bounds);
    }
}
