use super::time_entry::NamedRef;
use serde::{Deserialize, Serialize};

/// Issue details (`GET /issues.json`), looked up by numeric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueMetadata {
    pub id: u32,
    pub subject: String,
    pub tracker: NamedRef,
    pub status: NamedRef,
    #[serde(default)]
    pub priority: Option<NamedRef>,
    pub project: NamedRef,
    #[serde(default)]
    pub description: Option<String>,
}

/// Where an entry in the issue picker came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueSource {
    Api,
    Predefined,
    Custom,
}

impl IssueSource {
    pub fn label(&self) -> &'static str {
        match self {
            IssueSource::Api => "redmine",
            IssueSource::Predefined => "predefined",
            IssueSource::Custom => "custom",
        }
    }
}

/// One selectable issue for the time entry form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueChoice {
    pub id: u32,
    pub subject: String,
    pub source: IssueSource,
    pub tracker: Option<String>,
    pub status: Option<String>,
}

impl From<&IssueMetadata> for IssueChoice {
    fn from(issue: &IssueMetadata) -> Self {
        Self {
            id: issue.id,
            subject: issue.subject.clone(),
            source: IssueSource::Api,
            tracker: Some(issue.tracker.name.clone()),
            status: Some(issue.status.name.clone()),
        }
    }
}

/// A user-defined shortcut to an issue the project query does not list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomIssue {
    pub id: String,       // ⇔ custom_issue.id (UUID v4)
    pub owner_id: String, // ⇔ custom_issue.user_id
    pub issue_id: u32,    // ⇔ custom_issue.issue_id
    pub subject: String,
    pub created_at: String,
}
