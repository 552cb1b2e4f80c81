//! Storage seams used by the calendar pipeline and the mutation logic.
//!
//! The SQLite-backed `DbPool` implements both stores; tests substitute
//! in-memory fakes. Every operation is scoped to an owner id and rows owned
//! by someone else are reported as `NotFound`.

use crate::errors::AppResult;
use crate::models::date_window::DateWindow;
use crate::models::issue::CustomIssue;
use crate::models::placeholder::{NewPlaceholder, PlaceholderEntry, PlaceholderPatch};

pub trait PlaceholderStore {
    /// Placeholders of `owner_id` whose date falls inside `window`, ordered by date.
    fn list_placeholders(
        &self,
        owner_id: &str,
        window: &DateWindow,
    ) -> AppResult<Vec<PlaceholderEntry>>;

    fn create_placeholder(
        &self,
        owner_id: &str,
        fields: &NewPlaceholder,
    ) -> AppResult<PlaceholderEntry>;

    fn update_placeholder(
        &self,
        owner_id: &str,
        id: &str,
        patch: &PlaceholderPatch,
    ) -> AppResult<PlaceholderEntry>;

    fn delete_placeholder(&self, owner_id: &str, id: &str) -> AppResult<()>;
}

pub trait CustomIssueStore {
    /// Ordered by issue id.
    fn list_custom_issues(&self, owner_id: &str) -> AppResult<Vec<CustomIssue>>;

    /// Fails with `Validation` when the owner already has `issue_id`.
    fn add_custom_issue(&self, owner_id: &str, issue_id: u32, subject: &str)
    -> AppResult<CustomIssue>;

    /// `issue_id` is the Redmine issue number, not the row id.
    fn delete_custom_issue(&self, owner_id: &str, issue_id: u32) -> AppResult<()>;
}
