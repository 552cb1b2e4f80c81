use crate::core::merge::is_high_workload;
use crate::core::pipeline::CalendarView;
use crate::models::calendar_entry::CalendarEntry;
use crate::utils::colors::{BOLD, GREY, RESET, YELLOW, color_for_day_total, color_for_placeholder};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_duration;
use chrono::NaiveDate;

/// Table of the entries booked on `day`, then the day's totals.
pub fn render_day(
    view: &CalendarView,
    day: NaiveDate,
    expected_hours: f64,
    high_workload_hours: f64,
) -> String {
    let mut out = format!("{BOLD}{}{RESET}\n\n", day.format("%A, %Y-%m-%d"));

    let entries = view.entries_for_day(day);
    if entries.is_empty() {
        out.push_str(&format!("{GREY}No entries for this day.{RESET}\n"));
        return out;
    }

    let mut table = Table::new(vec![
        Column::left("Kind", 10),
        Column::right("Time", 6),
        Column::left("Issue", 8),
        Column::left("Title", 40),
        Column::left("ID", 10),
    ]);

    // remember which rows are placeholders to colour them afterwards
    let mut kinds: Vec<Option<&'static str>> = Vec::new();

    for entry in &entries {
        match entry {
            CalendarEntry::Task(t) => {
                let title = match &t.issue_subject {
                    Some(subject) => format!("{} ({})", t.title, subject),
                    None => t.title.clone(),
                };
                table.add_row(vec![
                    t.task_type.as_str().to_string(),
                    format_duration(t.duration),
                    t.issue_ref(),
                    title,
                    t.id.to_string(),
                ]);
                kinds.push(None);
            }
            CalendarEntry::Placeholder(p) => {
                table.add_row(vec![
                    p.kind.to_db_str().to_string(),
                    format_duration(p.duration_hours),
                    String::new(),
                    p.note.clone().unwrap_or_default(),
                    p.id.chars().take(8).collect(),
                ]);
                kinds.push(Some(p.kind.to_db_str()));
            }
        }
    }

    let rendered = table.render();
    for (i, line) in rendered.lines().enumerate() {
        // two header lines precede the rows
        match i.checked_sub(2).and_then(|r| kinds.get(r).copied().flatten()) {
            Some(kind) => out.push_str(&format!("{}{}{RESET}\n", color_for_placeholder(kind), line)),
            None => {
                out.push_str(line);
                out.push('\n');
            }
        }
    }

    let totals = view.day_totals(day);
    let color = color_for_day_total(totals.total, expected_hours);
    out.push_str(&format!(
        "\nTotal: {color}{}{RESET} (remote {}, placeholders {})\n",
        format_duration(totals.total),
        format_duration(totals.remote),
        format_duration(totals.placeholder)
    ));
    if is_high_workload(totals.total, high_workload_hours) {
        out.push_str(&format!("{YELLOW}High workload day{RESET}\n"));
    }

    out
}
