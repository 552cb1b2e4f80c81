//! JSON envelopes of the Redmine REST API.

use crate::models::issue::IssueMetadata;
use crate::models::time_entry::{EntryTarget, NewTimeEntry, RemoteTimeEntry, RemoteUser, TimeEntryPatch};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TimeEntriesResponse {
    pub time_entries: Vec<RemoteTimeEntry>,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct TimeEntryEnvelope {
    pub time_entry: RemoteTimeEntry,
}

#[derive(Debug, Deserialize)]
pub struct IssuesResponse {
    pub issues: Vec<IssueMetadata>,
    #[serde(default)]
    pub total_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    pub user: RemoteUser,
}

/// `{"errors": ["Hours is invalid", ...]}` as returned with 422.
#[derive(Debug, Deserialize)]
pub struct ErrorsResponse {
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize, Default, PartialEq)]
pub struct TimeEntryBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spent_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TimeEntryRequest {
    pub time_entry: TimeEntryBody,
}

impl From<&NewTimeEntry> for TimeEntryRequest {
    fn from(entry: &NewTimeEntry) -> Self {
        let (issue_id, project_id) = match entry.target {
            EntryTarget::Issue(id) => (Some(id), None),
            EntryTarget::Project(id) => (None, Some(id)),
        };
        Self {
            time_entry: TimeEntryBody {
                issue_id,
                project_id,
                hours: Some(entry.hours),
                comments: Some(entry.comments.clone()),
                spent_on: Some(entry.spent_on.format("%Y-%m-%d").to_string()),
                activity_id: Some(entry.activity_id),
            },
        }
    }
}

impl From<&TimeEntryPatch> for TimeEntryRequest {
    fn from(patch: &TimeEntryPatch) -> Self {
        Self {
            time_entry: TimeEntryBody {
                issue_id: patch.issue_id,
                project_id: None,
                hours: patch.hours,
                comments: patch.comments.clone(),
                spent_on: patch.spent_on.map(|d| d.format("%Y-%m-%d").to_string()),
                activity_id: patch.activity_id,
            },
        }
    }
}
