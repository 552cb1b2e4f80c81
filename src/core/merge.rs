//! Combine remote tasks and placeholders into one chronological list and
//! derive the totals the views show.
//!
//! Dates are calendar dates; filtering compares year/month/day components
//! and never converts between time zones.

use crate::models::calendar_entry::CalendarEntry;
use crate::models::date_window::DateWindow;
use chrono::{Datelike, NaiveDate};

/// Concatenate `tasks` then `placeholders` and sort by date.
///
/// The sort is stable: on the same date remote entries keep coming before
/// placeholders, and each group keeps its input order.
pub fn merge<T, P>(tasks: Vec<T>, placeholders: Vec<P>) -> Vec<CalendarEntry>
where
    T: Into<CalendarEntry>,
    P: Into<CalendarEntry>,
{
    let mut entries: Vec<CalendarEntry> = Vec::with_capacity(tasks.len() + placeholders.len());
    entries.extend(tasks.into_iter().map(Into::into));
    entries.extend(placeholders.into_iter().map(Into::into));
    entries.sort_by_key(CalendarEntry::date);
    entries
}

pub fn entries_for_day(entries: &[CalendarEntry], day: NaiveDate) -> Vec<&CalendarEntry> {
    entries.iter().filter(|e| e.date() == day).collect()
}

pub fn entries_in_month(entries: &[CalendarEntry], year: i32, month: u32) -> Vec<&CalendarEntry> {
    entries
        .iter()
        .filter(|e| {
            let d = e.date();
            d.year() == year && d.month() == month
        })
        .collect()
}

pub fn total_hours_for_day(entries: &[CalendarEntry], day: NaiveDate) -> f64 {
    day_totals(entries, day).total
}

pub fn total_hours_in_window(entries: &[CalendarEntry], window: &DateWindow) -> f64 {
    entries
        .iter()
        .filter(|e| window.contains(e.date()))
        .map(CalendarEntry::duration)
        .sum()
}

/// Hours booked on one day, split by origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayTotals {
    pub total: f64,
    pub remote: f64,
    pub placeholder: f64,
}

pub fn day_totals(entries: &[CalendarEntry], day: NaiveDate) -> DayTotals {
    entries
        .iter()
        .filter(|e| e.date() == day)
        .fold(DayTotals::default(), |mut acc, e| {
            let hours = e.duration();
            acc.total += hours;
            if e.is_placeholder() {
                acc.placeholder += hours;
            } else {
                acc.remote += hours;
            }
            acc
        })
}

/// Display hint only; nothing is refused because of it.
pub fn is_high_workload(total: f64, threshold: f64) -> bool {
    total >= threshold
}

/// Count and hours of remote entries within one month.
pub fn month_remote_summary(entries: &[CalendarEntry], year: i32, month: u32) -> (usize, f64) {
    entries_in_month(entries, year, month)
        .into_iter()
        .filter(|e| !e.is_placeholder())
        .fold((0, 0.0), |(n, h), e| (n + 1, h + e.duration()))
}
