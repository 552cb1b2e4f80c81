use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// Inclusive range of calendar days.
///
/// Windows built by `core::range::compute_visible_window` always start on a
/// Monday and end on a Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// Build a window, swapping the bounds if they come in reverse.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Number of days, both ends included.
    pub fn len_days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    /// Every day of the window in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.from.iter_days().take_while(|d| *d <= self.to).collect()
    }

    /// Days chunked into rows of seven (only meaningful for week-aligned windows).
    pub fn weeks(&self) -> Vec<Vec<NaiveDate>> {
        self.days().chunks(7).map(|w| w.to_vec()).collect()
    }

    /// `YYYY-MM-DD` bounds as the tracker's `from`/`to` filter expects them.
    pub fn as_params(&self) -> (String, String) {
        (
            self.from.format("%Y-%m-%d").to_string(),
            self.to.format("%Y-%m-%d").to_string(),
        )
    }

    pub fn covers_month(&self, year: i32, month: u32) -> bool {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return false;
        };
        let last = first
            .iter_days()
            .take_while(|d| d.month() == month)
            .last()
            .unwrap_or(first);
        self.contains(first) && self.contains(last)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}
