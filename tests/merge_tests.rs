use rtcal::core::merge::{
    day_totals, entries_for_day, entries_in_month, is_high_workload, merge, month_remote_summary,
    total_hours_for_day, total_hours_in_window,
};
use rtcal::core::range::compute_visible_window;
use rtcal::models::calendar_entry::{CalendarEntry, DisplayTask};
use rtcal::models::placeholder::PlaceholderEntry;
use rtcal::models::placeholder_kind::PlaceholderKind;

mod common;
use common::{d, placeholder, remote_entry};

fn task(id: u32, date: chrono::NaiveDate, hours: f64) -> DisplayTask {
    DisplayTask::from_remote(&remote_entry(id, date, hours, Some(100 + id)))
}

#[test]
fn test_merge_keeps_every_entry_in_date_order() {
    let tasks = vec![
        task(1, d(2024, 2, 12), 1.0),
        task(2, d(2024, 2, 5), 2.0),
        task(3, d(2024, 2, 20), 3.0),
    ];
    let placeholders = vec![
        placeholder("p1", d(2024, 2, 7), PlaceholderKind::Vacation, 8.0),
        placeholder("p2", d(2024, 2, 1), PlaceholderKind::Doctor, 2.0),
    ];

    let merged = merge(tasks, placeholders);

    assert_eq!(merged.len(), 5);
    let dates: Vec<_> = merged.iter().map(CalendarEntry::date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}

#[test]
fn test_remote_entries_come_first_on_the_same_day() {
    let day = d(2024, 3, 4);
    let merged = merge(
        vec![task(10, day, 1.0), task(11, day, 2.0)],
        vec![placeholder("p", day, PlaceholderKind::Holiday, 8.0)],
    );

    assert!(!merged[0].is_placeholder());
    assert!(!merged[1].is_placeholder());
    assert!(merged[2].is_placeholder());
    // input order inside a group survives the sort
    assert_eq!(merged[0].as_task().unwrap().id, 10);
    assert_eq!(merged[1].as_task().unwrap().id, 11);
}

#[test]
fn test_merge_is_idempotent() {
    let once = merge(
        vec![task(1, d(2024, 2, 3), 1.0), task(2, d(2024, 2, 1), 1.5)],
        vec![placeholder("p", d(2024, 2, 2), PlaceholderKind::Sickday, 8.0)],
    );
    let twice = merge(once.clone(), Vec::<PlaceholderEntry>::new());
    assert_eq!(once, twice);
}

#[test]
fn test_empty_inputs() {
    let merged = merge(Vec::<DisplayTask>::new(), Vec::<PlaceholderEntry>::new());
    assert!(merged.is_empty());
    assert_eq!(total_hours_for_day(&merged, d(2024, 1, 1)), 0.0);
}

#[test]
fn test_day_totals_split_by_origin() {
    let day = d(2024, 2, 14);
    let merged = merge(
        vec![task(1, day, 2.0), task(2, d(2024, 2, 15), 5.0)],
        vec![placeholder("p", day, PlaceholderKind::Doctor, 4.0)],
    );

    let totals = day_totals(&merged, day);
    assert_eq!(totals.total, 6.0);
    assert_eq!(totals.remote, 2.0);
    assert_eq!(totals.placeholder, 4.0);
    assert_eq!(entries_for_day(&merged, day).len(), 2);

    assert_eq!(total_hours_for_day(&merged, d(2024, 2, 16)), 0.0);
    assert!(entries_for_day(&merged, d(2024, 2, 16)).is_empty());
}

#[test]
fn test_high_workload_threshold_is_inclusive() {
    assert!(is_high_workload(6.0, 6.0));
    assert!(is_high_workload(9.5, 6.0));
    assert!(!is_high_workload(5.99, 6.0));
}

#[test]
fn test_month_filter_ignores_padding_days() {
    // January 29-31 and March 1-3 are shown in the February grid
    let window = compute_visible_window(d(2024, 2, 1));
    let merged = merge(
        vec![
            task(1, d(2024, 1, 30), 1.0),
            task(2, d(2024, 2, 10), 2.0),
            task(3, d(2024, 2, 29), 3.0),
            task(4, d(2024, 3, 2), 4.0),
        ],
        vec![placeholder("p", d(2024, 2, 12), PlaceholderKind::Vacation, 8.0)],
    );

    assert_eq!(entries_in_month(&merged, 2024, 2).len(), 3);
    assert_eq!(month_remote_summary(&merged, 2024, 2), (2, 5.0));
    assert_eq!(total_hours_in_window(&merged, &window), 18.0);
}
