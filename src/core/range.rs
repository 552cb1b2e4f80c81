//! Visible date window for the Monday-first month grid, plus the
//! navigation steps (previous/next month, previous/next day).

use crate::models::date_window::DateWindow;
use chrono::{Datelike, Days, Months, NaiveDate};

/// First and last day of the month containing `anchor`.
pub fn month_bounds(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = anchor.with_day(1).unwrap_or(anchor);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);
    (first, last)
}

/// Days from the Monday on or before the 1st up to the Sunday on or after the
/// last day of the month. The day-of-month of `anchor` is ignored.
pub fn compute_visible_window(anchor: NaiveDate) -> DateWindow {
    let (first, last) = month_bounds(anchor);

    // ISO weekday: Monday = 1 ... Sunday = 7
    let back = u64::from(first.weekday().number_from_monday() - 1);
    let forward = u64::from(7 - last.weekday().number_from_monday());

    let from = first.checked_sub_days(Days::new(back)).unwrap_or(first);
    let to = last.checked_add_days(Days::new(forward)).unwrap_or(last);

    DateWindow { from, to }
}

/// The 1st of the previous month.
pub fn previous_month(anchor: NaiveDate) -> NaiveDate {
    let (first, _) = month_bounds(anchor);
    first.checked_sub_months(Months::new(1)).unwrap_or(first)
}

/// The 1st of the next month.
pub fn next_month(anchor: NaiveDate) -> NaiveDate {
    let (first, _) = month_bounds(anchor);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

pub fn previous_day(day: NaiveDate) -> NaiveDate {
    day.pred_opt().unwrap_or(day)
}

pub fn next_day(day: NaiveDate) -> NaiveDate {
    day.succ_opt().unwrap_or(day)
}
