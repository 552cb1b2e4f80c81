use rtcal::core::cache::QueryCache;
use rtcal::core::enrich::{collect_issue_ids, enrich};

mod common;
use common::{FakeTracker, d, issue, remote_entry};

#[test]
fn test_collect_issue_ids_dedups_and_sorts() {
    let entries = vec![
        remote_entry(1, d(2024, 2, 1), 1.0, Some(30)),
        remote_entry(2, d(2024, 2, 2), 1.0, None),
        remote_entry(3, d(2024, 2, 3), 1.0, Some(10)),
        remote_entry(4, d(2024, 2, 4), 1.0, Some(30)),
    ];
    assert_eq!(collect_issue_ids(&entries), vec![10, 30]);
}

#[test]
fn test_enrich_uses_one_batch_and_keeps_order() {
    let entries = vec![
        remote_entry(1, d(2024, 2, 5), 1.0, Some(200)),
        remote_entry(2, d(2024, 2, 1), 2.0, Some(100)),
        remote_entry(3, d(2024, 2, 3), 0.5, None),
        remote_entry(4, d(2024, 2, 2), 1.5, Some(200)),
    ];
    let tracker = FakeTracker::default()
        .with_issues(vec![issue(100, "Login page"), issue(200, "Calendar grid")]);
    let cache = QueryCache::default();

    let tasks = enrich(&tracker, &cache, &entries);

    assert_eq!(tasks.len(), 4);
    let ids: Vec<u32> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(tracker.batches(), vec![vec![100, 200]]);

    assert_eq!(tasks[0].issue_subject.as_deref(), Some("Calendar grid"));
    assert_eq!(tasks[1].issue_subject.as_deref(), Some("Login page"));
    assert!(!tasks[2].is_enriched());
    assert_eq!(tasks[3].issue_status.as_deref(), Some("In Progress"));
}

#[test]
fn test_unknown_issue_leaves_task_unenriched() {
    let entries = vec![
        remote_entry(1, d(2024, 2, 1), 1.0, Some(100)),
        remote_entry(2, d(2024, 2, 2), 1.0, Some(999)),
    ];
    let tracker = FakeTracker::default().with_issues(vec![issue(100, "Known")]);
    let cache = QueryCache::default();

    let tasks = enrich(&tracker, &cache, &entries);

    assert!(tasks[0].is_enriched());
    assert!(!tasks[1].is_enriched());
    assert_eq!(tasks[1].issue_id, Some(999));
}

#[test]
fn test_cached_issues_are_not_fetched_again() {
    let entries = vec![remote_entry(1, d(2024, 2, 1), 1.0, Some(100))];
    let tracker = FakeTracker::default().with_issues(vec![issue(100, "Known")]);
    let cache = QueryCache::default();

    enrich(&tracker, &cache, &entries);
    let again = enrich(&tracker, &cache, &entries);

    assert_eq!(tracker.batches().len(), 1);
    assert!(again[0].is_enriched());
    assert!(cache.issue(100).is_some());
}

#[test]
fn test_failed_batch_still_returns_every_task() {
    let entries = vec![
        remote_entry(1, d(2024, 2, 1), 1.0, Some(100)),
        remote_entry(2, d(2024, 2, 2), 1.0, None),
    ];
    let tracker = FakeTracker {
        fail_issues: true,
        ..FakeTracker::default()
    }
    .with_issues(vec![issue(100, "Known")]);
    let cache = QueryCache::default();

    let tasks = enrich(&tracker, &cache, &entries);

    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| !t.is_enriched()));
}

#[test]
fn test_no_issue_ids_means_no_request() {
    let entries = vec![remote_entry(1, d(2024, 2, 1), 1.0, None)];
    let tracker = FakeTracker::default();
    let cache = QueryCache::default();

    let tasks = enrich(&tracker, &cache, &entries);

    assert_eq!(tasks.len(), 1);
    assert!(tracker.batches().is_empty());
}
