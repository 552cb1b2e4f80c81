use reqwest::StatusCode;
use rtcal::errors::AppError;
use rtcal::models::time_entry::{EntryTarget, NewTimeEntry, TimeEntryPatch};
use rtcal::remote::client::RedmineClient;
use rtcal::remote::errors::from_status;
use rtcal::remote::wire::{IssuesResponse, TimeEntriesResponse, TimeEntryRequest};
use std::time::Duration;

mod common;
use common::d;

const TIME_ENTRIES_JSON: &str = r#"{
  "time_entries": [
    {
      "id": 5501,
      "project": {"id": 7, "name": "Calendar"},
      "issue": {"id": 186933},
      "user": {"id": 42, "name": "Alice Example"},
      "activity": {"id": 9, "name": "Development"},
      "hours": 1.5,
      "comments": "Grid layout",
      "spent_on": "2024-02-14",
      "created_on": "2024-02-14T09:12:00Z",
      "updated_on": "2024-02-14T09:12:00Z"
    },
    {
      "id": 5502,
      "project": {"id": 7, "name": "Calendar"},
      "user": {"id": 42, "name": "Alice Example"},
      "activity": {"id": 19, "name": "Operations - irregular"},
      "hours": 0.25,
      "spent_on": "2024-02-15"
    }
  ],
  "total_count": 2,
  "offset": 0,
  "limit": 100
}"#;

#[test]
fn test_decode_time_entries_page() {
    let page: TimeEntriesResponse = serde_json::from_str(TIME_ENTRIES_JSON).unwrap();

    assert_eq!(page.total_count, 2);
    assert_eq!(page.time_entries.len(), 2);

    let first = &page.time_entries[0];
    assert_eq!(first.issue_id(), Some(186933));
    assert_eq!(first.spent_on, d(2024, 2, 14));
    assert_eq!(first.comments(), "Grid layout");

    let second = &page.time_entries[1];
    assert_eq!(second.issue_id(), None);
    assert_eq!(second.comments(), "");
}

#[test]
fn test_decode_issues() {
    let json = r#"{"issues":[{"id":186933,"subject":"Calendar grid",
        "tracker":{"id":2,"name":"Feature"},"status":{"id":2,"name":"In Progress"},
        "project":{"id":7,"name":"Calendar"}}],"total_count":1}"#;
    let issues: IssuesResponse = serde_json::from_str(json).unwrap();

    assert_eq!(issues.issues[0].subject, "Calendar grid");
    assert_eq!(issues.issues[0].priority, None);
}

#[test]
fn test_create_body_targets_issue_or_project() {
    let entry = NewTimeEntry {
        target: EntryTarget::Issue(186933),
        hours: 1.5,
        comments: "Review".into(),
        spent_on: d(2024, 2, 14),
        activity_id: 9,
    };
    let body = serde_json::to_value(TimeEntryRequest::from(&entry)).unwrap();
    assert_eq!(body["time_entry"]["issue_id"], 186933);
    assert_eq!(body["time_entry"]["spent_on"], "2024-02-14");
    assert!(body["time_entry"].get("project_id").is_none());

    let on_project = NewTimeEntry {
        target: EntryTarget::Project(7),
        ..entry
    };
    let body = serde_json::to_value(TimeEntryRequest::from(&on_project)).unwrap();
    assert_eq!(body["time_entry"]["project_id"], 7);
    assert!(body["time_entry"].get("issue_id").is_none());
}

#[test]
fn test_patch_body_sends_only_changed_fields() {
    let patch = TimeEntryPatch {
        hours: Some(2.0),
        ..TimeEntryPatch::default()
    };
    let body = serde_json::to_value(TimeEntryRequest::from(&patch)).unwrap();
    let fields = body["time_entry"].as_object().unwrap();

    assert_eq!(fields.len(), 1);
    assert_eq!(fields["hours"], 2.0);
}

#[test]
fn test_status_mapping() {
    assert!(matches!(
        from_status(StatusCode::UNAUTHORIZED, "", "time entries"),
        AppError::Unauthorized(_)
    ));
    assert!(matches!(
        from_status(StatusCode::FORBIDDEN, "", "time entries"),
        AppError::Unauthorized(_)
    ));
    assert!(matches!(
        from_status(StatusCode::TOO_MANY_REQUESTS, "", "issues"),
        AppError::RateLimited(_)
    ));
    assert!(matches!(
        from_status(StatusCode::NOT_FOUND, "", "time entry 9"),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        from_status(StatusCode::BAD_GATEWAY, "<html>", "issues"),
        AppError::RemoteUnavailable(_)
    ));

    match from_status(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"errors":["Hours is invalid","Issue is invalid"]}"#,
        "new time entry",
    ) {
        AppError::Validation(msg) => assert_eq!(msg, "Hours is invalid; Issue is invalid"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_client_requires_url_and_key() {
    let timeout = Duration::from_secs(5);

    assert!(matches!(
        RedmineClient::new("  ", "key", timeout),
        Err(AppError::Config(_))
    ));
    assert!(matches!(
        RedmineClient::new("https://redmine.example.com/", "", timeout),
        Err(AppError::Config(_))
    ));
    assert!(RedmineClient::new("https://redmine.example.com/", "abc123", timeout).is_ok());
}
