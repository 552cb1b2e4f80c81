//! Month grid: Monday-first weeks, two lines per week (day number, hours).

use crate::core::merge::is_high_workload;
use crate::core::pipeline::CalendarView;
use crate::utils::colors::{BOLD, DIM, GREY, RESET, REVERSE, color_for_day_total};
use crate::utils::date::{is_in_month, month_title};
use crate::utils::formatting::{hours_short, pad_left, pad_right, separator};
use crate::utils::time::format_duration;
use chrono::{Datelike, NaiveDate};

const CELL: usize = 9;
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Colouring thresholds and the rule character from the config.
#[derive(Debug, Clone)]
pub struct GridStyle {
    pub expected_hours: f64,
    pub high_workload_hours: f64,
    pub separator: String,
}

fn day_cell(view: &CalendarView, day: NaiveDate, today: NaiveDate) -> String {
    let in_month = is_in_month(day, view.anchor.year(), view.anchor.month());
    let has_placeholder = view.entries_for_day(day).iter().any(|e| e.is_placeholder());

    let label = format!("{}{}", day.day(), if has_placeholder { "*" } else { "" });
    let text = pad_left(&label, CELL - 1);

    if !in_month {
        format!("{DIM}{text}{RESET} ")
    } else if day == today {
        format!("{REVERSE}{text}{RESET} ")
    } else {
        format!("{text} ")
    }
}

fn hours_cell(view: &CalendarView, day: NaiveDate, style: &GridStyle) -> String {
    let in_month = is_in_month(day, view.anchor.year(), view.anchor.month());
    let total = view.day_totals(day).total;

    let text = if total > 0.0 {
        pad_left(&hours_short(total), CELL - 1)
    } else {
        pad_left("·", CELL - 1)
    };

    if !in_month {
        return format!("{DIM}{text}{RESET} ");
    }

    let weekend = day.weekday().number_from_monday() >= 6;
    let color = if weekend && total <= 0.0 {
        GREY
    } else {
        color_for_day_total(total, style.expected_hours)
    };
    let weight = if is_high_workload(total, style.high_workload_hours) {
        BOLD
    } else {
        ""
    };
    format!("{weight}{color}{text}{RESET} ")
}

/// Render the grid of `view`, followed by the month summary.
pub fn render_month(view: &CalendarView, style: &GridStyle, today: NaiveDate) -> String {
    let width = CELL * 7;
    let mut out = String::new();

    let title = month_title(view.anchor);
    let pad = width.saturating_sub(title.len()) / 2;
    out.push_str(&format!("{}{BOLD}{}{RESET}\n", " ".repeat(pad), title));

    for name in WEEKDAYS {
        out.push_str(&pad_left(name, CELL - 1));
        out.push(' ');
    }
    out.push('\n');
    out.push_str(&separator(&style.separator, width));
    out.push('\n');

    for week in view.window.weeks() {
        let mut days_line = String::new();
        let mut hours_line = String::new();
        for day in &week {
            days_line.push_str(&day_cell(view, *day, today));
            hours_line.push_str(&hours_cell(view, *day, style));
        }
        out.push_str(days_line.trim_end());
        out.push('\n');
        out.push_str(hours_line.trim_end());
        out.push('\n');
    }

    out.push_str(&separator(&style.separator, width));
    out.push('\n');
    out.push_str(&render_summary(view));
    out
}

/// Remote entries and hours of the anchor's month, plus placeholder hours.
pub fn render_summary(view: &CalendarView) -> String {
    let (count, hours) = view.month_summary();
    let placeholder_hours: f64 = view
        .placeholders
        .iter()
        .filter(|p| is_in_month(p.date, view.anchor.year(), view.anchor.month()))
        .map(|p| p.duration_hours)
        .sum();

    let mut out = format!(
        "{} {} · {} {}\n",
        pad_right("Entries:", 10),
        count,
        "Hours:",
        format_duration(hours)
    );
    if placeholder_hours > 0.0 {
        out.push_str(&format!(
            "{} {}\n",
            pad_right("Absences:", 10),
            format_duration(placeholder_hours)
        ));
    }
    out.push_str(&format!(
        "{GREY}* = placeholder · window {}{RESET}\n",
        view.window
    ));
    out
}
