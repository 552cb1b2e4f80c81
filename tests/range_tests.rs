use chrono::{Datelike, Weekday};
use rtcal::core::range::{
    compute_visible_window, month_bounds, next_day, next_month, previous_day, previous_month,
};

mod common;
use common::d;

#[test]
fn test_window_for_february_2024() {
    // 2024-02-01 is a Thursday
    let w = compute_visible_window(d(2024, 2, 1));
    assert_eq!(w.from, d(2024, 1, 29));
    assert_eq!(w.to, d(2024, 3, 3));
    assert_eq!(w.len_days(), 35);
}

#[test]
fn test_window_when_first_is_monday() {
    let w = compute_visible_window(d(2023, 5, 1));
    assert_eq!(w.from, d(2023, 5, 1));
    assert_eq!(w.to, d(2023, 6, 4));
}

#[test]
fn test_day_of_month_is_ignored() {
    assert_eq!(
        compute_visible_window(d(2024, 2, 17)),
        compute_visible_window(d(2024, 2, 1))
    );
}

#[test]
fn test_first_on_sunday_needs_six_leading_days() {
    // 2023-10-01 is a Sunday
    let w = compute_visible_window(d(2023, 10, 15));
    assert_eq!(w.from, d(2023, 9, 25));
    assert_eq!(w.to, d(2023, 11, 5));
    assert_eq!(w.len_days(), 42);
}

#[test]
fn test_december_rolls_into_january() {
    let w = compute_visible_window(d(2024, 12, 10));
    assert_eq!(w.from, d(2024, 11, 25));
    assert_eq!(w.to, d(2025, 1, 5));
}

#[test]
fn test_february_leap_and_non_leap() {
    let (_, last) = month_bounds(d(2024, 2, 10));
    assert_eq!(last, d(2024, 2, 29));
    let (_, last) = month_bounds(d(2023, 2, 10));
    assert_eq!(last, d(2023, 2, 28));

    // 2021-02 starts on Monday and ends on Sunday: exactly four weeks
    let w = compute_visible_window(d(2021, 2, 1));
    assert_eq!(w.from, d(2021, 2, 1));
    assert_eq!(w.to, d(2021, 2, 28));
    assert_eq!(w.len_days(), 28);
}

#[test]
fn test_every_month_is_whole_weeks_covering_the_month() {
    for year in 1999..=2030 {
        for month in 1..=12 {
            let anchor = d(year, month, 1);
            let w = compute_visible_window(anchor);
            let (first, last) = month_bounds(anchor);

            assert_eq!(w.len_days() % 7, 0, "{year}-{month}");
            assert_eq!(w.from.weekday(), Weekday::Mon, "{year}-{month}");
            assert_eq!(w.to.weekday(), Weekday::Sun, "{year}-{month}");
            assert!(w.contains(first) && w.contains(last), "{year}-{month}");
            assert!(w.covers_month(year, month));
            assert!(w.len_days() <= 42);
            assert_eq!(w.weeks().len() as i64, w.len_days() / 7);
        }
    }
}

#[test]
fn test_navigation_steps() {
    assert_eq!(previous_month(d(2024, 1, 31)), d(2023, 12, 1));
    assert_eq!(next_month(d(2024, 1, 31)), d(2024, 2, 1));
    assert_eq!(next_month(d(2024, 12, 5)), d(2025, 1, 1));
    assert_eq!(previous_day(d(2024, 3, 1)), d(2024, 2, 29));
    assert_eq!(next_day(d(2023, 12, 31)), d(2024, 1, 1));
}
