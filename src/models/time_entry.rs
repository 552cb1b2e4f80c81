//! Time entries as the Redmine REST API returns them
//! (`GET /time_entries.json`), plus the request shapes for mutations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// `{ "id": 1, "name": "..." }` reference used throughout the Redmine API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteTimeEntry {
    pub id: u32,
    pub project: NamedRef,
    #[serde(default)]
    pub issue: Option<IdRef>,
    pub user: NamedRef,
    pub activity: NamedRef,
    pub hours: f64,
    #[serde(default)]
    pub comments: Option<String>,
    pub spent_on: NaiveDate,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
}

impl RemoteTimeEntry {
    pub fn issue_id(&self) -> Option<u32> {
        self.issue.map(|i| i.id)
    }

    pub fn comments(&self) -> &str {
        self.comments.as_deref().unwrap_or("")
    }
}

/// What a new time entry is booked against. Redmine requires one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTarget {
    Issue(u32),
    Project(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeEntry {
    pub target: EntryTarget,
    pub hours: f64,
    pub comments: String,
    pub spent_on: NaiveDate,
    pub activity_id: u32,
}

impl NewTimeEntry {
    /// Copy of an existing entry, booked on the same issue (or project when
    /// the original has no issue).
    pub fn duplicate_of(entry: &RemoteTimeEntry) -> Self {
        let target = match entry.issue_id() {
            Some(id) => EntryTarget::Issue(id),
            None => EntryTarget::Project(entry.project.id),
        };
        Self {
            target,
            hours: entry.hours,
            comments: entry.comments().to_string(),
            spent_on: entry.spent_on,
            activity_id: entry.activity.id,
        }
    }
}

/// Partial update of a time entry. Only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeEntryPatch {
    pub issue_id: Option<u32>,
    pub hours: Option<f64>,
    pub comments: Option<String>,
    pub spent_on: Option<NaiveDate>,
    pub activity_id: Option<u32>,
}

impl TimeEntryPatch {
    pub fn is_empty(&self) -> bool {
        self.issue_id.is_none()
            && self.hours.is_none()
            && self.comments.is_none()
            && self.spent_on.is_none()
            && self.activity_id.is_none()
    }
}

/// Owner filter for the time entry list (`user_id=` query parameter).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnerFilter {
    /// The user the API key belongs to (`user_id=me`).
    Me,
    User(u32),
    Anyone,
}

impl OwnerFilter {
    pub fn as_param(&self) -> Option<String> {
        match self {
            OwnerFilter::Me => Some("me".to_string()),
            OwnerFilter::User(id) => Some(id.to_string()),
            OwnerFilter::Anyone => None,
        }
    }
}

/// The Redmine account an API key belongs to (`/users/current.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: u32,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

impl RemoteUser {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.firstname, self.lastname);
        let full = full.trim();
        if full.is_empty() {
            self.login.clone()
        } else {
            full.to_string()
        }
    }
}
