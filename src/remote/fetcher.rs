use super::{MAX_PAGE_SIZE, TimeEntryQuery, TrackerClient};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::date_window::DateWindow;
use crate::models::time_entry::{OwnerFilter, RemoteTimeEntry};

/// How far the fetcher pages before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingPolicy {
    pub page_size: u32,
    pub max_pages: u32,
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            max_pages: 10,
        }
    }
}

impl PagingPolicy {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            page_size: cfg.page_size.clamp(1, MAX_PAGE_SIZE),
            max_pages: cfg.max_pages.max(1),
        }
    }
}

/// All time entries of `owner` inside `window`.
///
/// Pages until the tracker reports exhaustion (an empty page or
/// `offset + len >= total_count`) or `policy.max_pages` pages were read.
/// Errors from the client are returned as-is; they are already typed.
pub fn fetch_remote_entries(
    client: &dyn TrackerClient,
    window: &DateWindow,
    owner: &OwnerFilter,
    policy: PagingPolicy,
) -> AppResult<Vec<RemoteTimeEntry>> {
    let page_size = policy.page_size.clamp(1, MAX_PAGE_SIZE);
    let mut entries: Vec<RemoteTimeEntry> = Vec::new();
    let mut offset = 0u32;

    for page_no in 0..policy.max_pages.max(1) {
        let query = TimeEntryQuery {
            owner: owner.clone(),
            from: window.from,
            to: window.to,
            limit: page_size,
            offset,
        };

        let page = client.list_time_entries(&query)?;
        let received = page.entries.len() as u32;
        log::debug!(
            "page {} of time entries {}: {} received, total {}",
            page_no + 1,
            window,
            received,
            page.total_count
        );

        entries.extend(page.entries);

        if received == 0 {
            return Ok(entries);
        }
        offset += received;
        if offset >= page.total_count {
            return Ok(entries);
        }
    }

    log::warn!(
        "stopped after {} pages of time entries for {} ({} loaded)",
        policy.max_pages,
        window,
        entries.len()
    );
    Ok(entries)
}
