//! Create/update/delete operations on time entries, placeholders and custom
//! issues.
//!
//! Input is validated before anything is sent or stored. On success the
//! affected cache partition is invalidated; on failure caches stay as they
//! were.

use crate::core::cache::{Partition, QueryCache};
use crate::core::ports::{CustomIssueStore, PlaceholderStore};
use crate::errors::{AppError, AppResult};
use crate::models::issue::CustomIssue;
use crate::models::placeholder::{NewPlaceholder, PlaceholderEntry, PlaceholderPatch};
use crate::models::time_entry::{EntryTarget, NewTimeEntry, RemoteTimeEntry, TimeEntryPatch};
use crate::remote::TrackerClient;
use crate::session::SessionProvider;
use crate::utils::time::parse_positive_duration;
use chrono::NaiveDate;

/// Raw values of the time entry form.
#[derive(Debug, Clone, Default)]
pub struct TimeEntryForm {
    pub issue_id: Option<u32>,
    pub hours: String,
    pub comments: String,
    pub spent_on: Option<NaiveDate>,
    pub activity_id: Option<u32>,
}

impl TimeEntryForm {
    /// Check the form and turn it into a request. `default_activity` is used
    /// when no activity was chosen.
    pub fn validate(&self, default_activity: u32) -> AppResult<NewTimeEntry> {
        let issue_id = self
            .issue_id
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::Validation("Issue is required".into()))?;
        let spent_on = self
            .spent_on
            .ok_or_else(|| AppError::Validation("Date is required".into()))?;
        let hours = parse_positive_duration(&self.hours)?;

        Ok(NewTimeEntry {
            target: EntryTarget::Issue(issue_id),
            hours,
            comments: self.comments.trim().to_string(),
            spent_on,
            activity_id: self.activity_id.unwrap_or(default_activity),
        })
    }
}

// ---------------------------
// Time entries
// ---------------------------

pub fn create_time_entry(
    client: &dyn TrackerClient,
    cache: &QueryCache,
    session: &dyn SessionProvider,
    form: &TimeEntryForm,
    default_activity: u32,
) -> AppResult<RemoteTimeEntry> {
    session.require_user()?;
    let entry = form.validate(default_activity)?;

    let created = client.create_time_entry(&entry)?;
    cache.invalidate(Partition::Remote);
    log::info!("time entry {} created on {}", created.id, created.spent_on);
    Ok(created)
}

pub fn update_time_entry(
    client: &dyn TrackerClient,
    cache: &QueryCache,
    session: &dyn SessionProvider,
    id: u32,
    patch: &TimeEntryPatch,
) -> AppResult<()> {
    session.require_user()?;
    if patch.is_empty() {
        return Err(AppError::Validation("Nothing to update".into()));
    }
    if let Some(h) = patch.hours
        && (!h.is_finite() || h <= 0.0)
    {
        return Err(AppError::InvalidDuration(format!(
            "{h} - hours must be greater than zero"
        )));
    }
    if patch.issue_id == Some(0) {
        return Err(AppError::Validation("Issue is required".into()));
    }

    client.update_time_entry(id, patch)?;
    cache.invalidate(Partition::Remote);
    log::info!("time entry {} updated", id);
    Ok(())
}

pub fn delete_time_entry(
    client: &dyn TrackerClient,
    cache: &QueryCache,
    session: &dyn SessionProvider,
    id: u32,
) -> AppResult<()> {
    session.require_user()?;
    client.delete_time_entry(id)?;
    cache.invalidate(Partition::Remote);
    log::info!("time entry {} deleted", id);
    Ok(())
}

/// Re-create entry `id`, optionally on another date.
pub fn duplicate_time_entry(
    client: &dyn TrackerClient,
    cache: &QueryCache,
    session: &dyn SessionProvider,
    id: u32,
    on: Option<NaiveDate>,
) -> AppResult<RemoteTimeEntry> {
    session.require_user()?;
    let original = client.get_time_entry(id)?;

    let mut copy = NewTimeEntry::duplicate_of(&original);
    if let Some(date) = on {
        copy.spent_on = date;
    }

    let created = client.create_time_entry(&copy)?;
    cache.invalidate(Partition::Remote);
    log::info!("time entry {} duplicated as {}", id, created.id);
    Ok(created)
}

// ---------------------------
// Placeholders
// ---------------------------

pub fn create_placeholder(
    store: &dyn PlaceholderStore,
    cache: &QueryCache,
    session: &dyn SessionProvider,
    fields: &NewPlaceholder,
) -> AppResult<PlaceholderEntry> {
    let owner = session.require_user()?;
    fields.validate()?;

    let created = store.create_placeholder(&owner, fields)?;
    cache.invalidate(Partition::Placeholders);
    Ok(created)
}

pub fn update_placeholder(
    store: &dyn PlaceholderStore,
    cache: &QueryCache,
    session: &dyn SessionProvider,
    id: &str,
    patch: &PlaceholderPatch,
) -> AppResult<PlaceholderEntry> {
    let owner = session.require_user()?;
    if patch.is_empty() {
        return Err(AppError::Validation("Nothing to update".into()));
    }
    patch.validate()?;

    let updated = store.update_placeholder(&owner, id, patch)?;
    cache.invalidate(Partition::Placeholders);
    Ok(updated)
}

pub fn delete_placeholder(
    store: &dyn PlaceholderStore,
    cache: &QueryCache,
    session: &dyn SessionProvider,
    id: &str,
) -> AppResult<()> {
    let owner = session.require_user()?;
    store.delete_placeholder(&owner, id)?;
    cache.invalidate(Partition::Placeholders);
    Ok(())
}

// ---------------------------
// Custom issues
// ---------------------------

pub fn add_custom_issue(
    store: &dyn CustomIssueStore,
    session: &dyn SessionProvider,
    issue_id: u32,
    subject: &str,
) -> AppResult<CustomIssue> {
    let owner = session.require_user()?;
    if issue_id == 0 {
        return Err(AppError::Validation("Issue ID must be a positive number".into()));
    }
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(AppError::Validation("Subject is required".into()));
    }
    store.add_custom_issue(&owner, issue_id, subject)
}

pub fn delete_custom_issue(
    store: &dyn CustomIssueStore,
    session: &dyn SessionProvider,
    issue_id: u32,
) -> AppResult<()> {
    let owner = session.require_user()?;
    store.delete_custom_issue(&owner, issue_id)
}

pub fn list_custom_issues(
    store: &dyn CustomIssueStore,
    session: &dyn SessionProvider,
) -> AppResult<Vec<CustomIssue>> {
    let owner = session.require_user()?;
    store.list_custom_issues(&owner)
}
