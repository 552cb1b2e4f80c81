//! Redmine REST API access.
//!
//! `TrackerClient` is the seam the rest of the crate talks to;
//! `RedmineClient` is the HTTP implementation.

pub mod client;
pub mod errors;
pub mod fetcher;
pub mod wire;

use crate::errors::AppResult;
use crate::models::issue::IssueMetadata;
use crate::models::time_entry::{
    NewTimeEntry, OwnerFilter, RemoteTimeEntry, RemoteUser, TimeEntryPatch,
};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Redmine refuses page sizes above this.
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page request against `/time_entries.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntryQuery {
    pub owner: OwnerFilter,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeEntryPage {
    pub entries: Vec<RemoteTimeEntry>,
    pub total_count: u32,
    pub offset: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IssueQuery {
    pub project_id: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

/// Operations the calendar needs from the issue tracker. Implementations are
/// shared with the fetch thread of the calendar loader, hence `Sync`.
pub trait TrackerClient: Send + Sync {
    fn list_time_entries(&self, query: &TimeEntryQuery) -> AppResult<TimeEntryPage>;

    fn get_time_entry(&self, id: u32) -> AppResult<RemoteTimeEntry>;

    fn create_time_entry(&self, entry: &NewTimeEntry) -> AppResult<RemoteTimeEntry>;

    fn update_time_entry(&self, id: u32, patch: &TimeEntryPatch) -> AppResult<()>;

    fn delete_time_entry(&self, id: u32) -> AppResult<()>;

    /// Single round trip; ids the tracker does not know are simply absent
    /// from the map.
    fn get_issues_by_ids(&self, ids: &[u32]) -> AppResult<HashMap<u32, IssueMetadata>>;

    fn list_issues(&self, query: &IssueQuery) -> AppResult<Vec<IssueMetadata>>;

    fn current_user(&self) -> AppResult<RemoteUser>;
}
