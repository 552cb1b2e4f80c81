use rtcal::config::{PredefinedIssue, parse_predefined_issues};
use rtcal::core::issues::{filter_issues, merge_issue_choices};
use rtcal::models::issue::{CustomIssue, IssueSource};

mod common;
use common::issue;

fn custom(issue_id: u32, subject: &str) -> CustomIssue {
    CustomIssue {
        id: format!("c-{issue_id}"),
        owner_id: "alice".into(),
        issue_id,
        subject: subject.into(),
        created_at: "2024-01-01T00:00:00+00:00".into(),
    }
}

fn predefined(id: u32, subject: &str) -> PredefinedIssue {
    PredefinedIssue {
        id,
        subject: subject.into(),
    }
}

#[test]
fn test_tracker_wins_over_predefined_over_custom() {
    let api = vec![issue(10, "From Redmine")];
    let pre = vec![predefined(10, "Predefined ten"), predefined(20, "Predefined twenty")];
    let cus = vec![custom(20, "Custom twenty"), custom(30, "Custom thirty")];

    let merged = merge_issue_choices(&api, &pre, &cus);

    assert_eq!(merged.len(), 3);
    assert_eq!(merged[0].id, 10);
    assert_eq!(merged[0].source, IssueSource::Api);
    assert_eq!(merged[0].subject, "From Redmine");
    assert_eq!(merged[1].source, IssueSource::Predefined);
    assert_eq!(merged[1].subject, "Predefined twenty");
    assert_eq!(merged[2].source, IssueSource::Custom);
}

#[test]
fn test_filter_by_id_or_subject() {
    let merged = merge_issue_choices(
        &[issue(186933, "Calendar grid"), issue(4711, "Login page")],
        &[predefined(100, "Internal meetings")],
        &[],
    );

    let by_id = filter_issues(&merged, "#1869");
    assert_eq!(by_id.len(), 1);
    assert_eq!(by_id[0].id, 186933);

    let by_subject = filter_issues(&merged, "MEETING");
    assert_eq!(by_subject.len(), 1);
    assert_eq!(by_subject[0].id, 100);

    assert_eq!(filter_issues(&merged, "  ").len(), 3);
    assert!(filter_issues(&merged, "nothing like this").is_empty());
}

#[test]
fn test_predefined_issues_from_env_string() {
    let parsed = parse_predefined_issues(
        r#"[{"id":100,"subject":"Internal meetings"},{"id":200,"subject":"Support"}]"#,
    );
    assert_eq!(
        parsed,
        Some(vec![
            predefined(100, "Internal meetings"),
            predefined(200, "Support")
        ])
    );

    assert_eq!(parse_predefined_issues("100:Internal meetings"), None);
    assert_eq!(parse_predefined_issues("  "), None);
}
