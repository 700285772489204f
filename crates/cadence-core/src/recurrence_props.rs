//! Property-based tests for recurring expense status.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use cadence_domain::Frequency;

use crate::recurrence::{RecurrenceConfig, RecurrenceTracker, UrgencyTier};

fn frequency_strategy() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Weekly),
        Just(Frequency::Monthly),
        Just(Frequency::Quarterly),
        Just(Frequency::Yearly),
    ]
}

fn due_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..20_000)
        .prop_map(|days| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(days))
}

/// Strategy for an instant up to 500 days either side of `due`.
fn around(due: NaiveDate) -> impl Strategy<Value = NaiveDateTime> {
    (-500i64 * 86_400_000..500 * 86_400_000).prop_map(move |offset| {
        due.and_hms_opt(0, 0, 0).unwrap() + Duration::milliseconds(offset)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Exactly one tier matches any day count, and Overdue iff the day count is not positive.
    #[test]
    fn prop_tiers_are_exhaustive(days in any::<i64>()) {
        let tier = UrgencyTier::from_days(days);
        prop_assert_eq!(tier == UrgencyTier::Overdue, days <= 0);
        let matches = UrgencyTier::ALL.iter().filter(|candidate| **candidate == tier).count();
        prop_assert_eq!(matches, 1);
    }

    #[test]
    fn prop_progress_stays_in_range(
        frequency in frequency_strategy(),
        (due, now) in due_date().prop_flat_map(|due| (Just(due), around(due))),
    ) {
        let config = RecurrenceConfig::new(frequency, due, 10.0);
        let status = RecurrenceTracker::compute_status(&config, now);
        prop_assert!((0.0..=100.0).contains(&status.period_progress_percent));
        if status.days_until_due <= 0 {
            prop_assert_eq!(status.period_progress_percent, 100.0);
        }
    }

    /// Progress never decreases as `now` moves toward and past the due date.
    #[test]
    fn prop_progress_is_monotonic(
        frequency in frequency_strategy(),
        (due, now) in due_date().prop_flat_map(|due| (Just(due), around(due))),
        step_millis in 0i64..(40 * 86_400_000),
    ) {
        let config = RecurrenceConfig::new(frequency, due, 10.0);
        let earlier = RecurrenceTracker::compute_status(&config, now);
        let later_now = now + Duration::milliseconds(step_millis);
        let later = RecurrenceTracker::compute_status(&config, later_now);
        prop_assert!(later.days_until_due <= earlier.days_until_due);
        prop_assert!(later.period_progress_percent >= earlier.period_progress_percent);
    }

    #[test]
    fn prop_costs_scale_with_multiplier(
        frequency in frequency_strategy(),
        cents in 0u32..10_000_000,
    ) {
        let amount = f64::from(cents) / 100.0;
        let due = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let now = NaiveDate::from_ymd_opt(2029, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let config = RecurrenceConfig::new(frequency, due, amount);
        let costs = RecurrenceTracker::compute_status(&config, now).costs;
        prop_assert_eq!(costs.annual_cost, amount * frequency.annual_multiplier());
        let drift = (costs.monthly_average * 12.0 - costs.annual_cost).abs();
        prop_assert!(drift <= 1e-6 * costs.annual_cost.max(1.0));
    }
}
