//! The issue list offered when booking time: issues from the tracker,
//! configured predefined issues and the user's custom issues.

use crate::config::PredefinedIssue;
use crate::models::issue::{CustomIssue, IssueChoice, IssueMetadata, IssueSource};
use std::collections::BTreeMap;

/// One list keyed by issue id, sorted ascending.
///
/// On id collisions the tracker's version wins over a predefined issue,
/// which wins over a custom one.
pub fn merge_issue_choices(
    api: &[IssueMetadata],
    predefined: &[PredefinedIssue],
    custom: &[CustomIssue],
) -> Vec<IssueChoice> {
    let mut by_id: BTreeMap<u32, IssueChoice> = BTreeMap::new();

    for c in custom {
        by_id.insert(
            c.issue_id,
            IssueChoice {
                id: c.issue_id,
                subject: c.subject.clone(),
                source: IssueSource::Custom,
                tracker: None,
                status: None,
            },
        );
    }
    for p in predefined {
        by_id.insert(
            p.id,
            IssueChoice {
                id: p.id,
                subject: p.subject.clone(),
                source: IssueSource::Predefined,
                tracker: None,
                status: None,
            },
        );
    }
    for issue in api {
        by_id.insert(issue.id, IssueChoice::from(issue));
    }

    by_id.into_values().collect()
}

/// Keep issues whose id contains `query` (a leading `#` is ignored) or
/// whose subject contains it, case-insensitively. A blank query keeps all.
pub fn filter_issues<'a>(choices: &'a [IssueChoice], query: &str) -> Vec<&'a IssueChoice> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return choices.iter().collect();
    }
    let id_q = q.replace('#', "");

    choices
        .iter()
        .filter(|c| {
            (!id_q.is_empty() && c.id.to_string().contains(&id_q))
                || c.subject.to_lowercase().contains(&q)
        })
        .collect()
}
