//! Attach issue metadata to remote time entries.

use crate::core::cache::QueryCache;
use crate::models::calendar_entry::DisplayTask;
use crate::models::issue::IssueMetadata;
use crate::models::time_entry::RemoteTimeEntry;
use crate::remote::TrackerClient;
use std::collections::{BTreeSet, HashMap};

/// Distinct issue ids referenced by `entries`, ascending.
pub fn collect_issue_ids(entries: &[RemoteTimeEntry]) -> Vec<u32> {
    entries
        .iter()
        .filter_map(RemoteTimeEntry::issue_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Convert `entries` one-to-one, attaching metadata where `lookup` has the
/// entry's issue. Order and count are preserved.
pub fn attach_issues(
    entries: &[RemoteTimeEntry],
    lookup: &HashMap<u32, IssueMetadata>,
) -> Vec<DisplayTask> {
    entries
        .iter()
        .map(|entry| {
            let task = DisplayTask::from_remote(entry);
            match entry.issue_id().and_then(|id| lookup.get(&id)) {
                Some(issue) => task.with_issue(issue),
                None => task,
            }
        })
        .collect()
}

/// Enrich `entries` with issue metadata.
///
/// Cached issues are reused; the remaining ids are fetched in a single
/// batch call. Issues the tracker does not return, or a failing batch call,
/// leave the affected tasks unenriched rather than failing the view.
pub fn enrich(
    client: &dyn TrackerClient,
    cache: &QueryCache,
    entries: &[RemoteTimeEntry],
) -> Vec<DisplayTask> {
    let ids = collect_issue_ids(entries);
    if ids.is_empty() {
        return attach_issues(entries, &HashMap::new());
    }

    let (mut lookup, misses) = cache.lookup_issues(&ids);

    if !misses.is_empty() {
        match client.get_issues_by_ids(&misses) {
            Ok(fetched) => {
                cache.store_issues(fetched.values());
                let unknown = misses.iter().filter(|id| !fetched.contains_key(id)).count();
                if unknown > 0 {
                    log::debug!("{} referenced issue(s) not returned by the tracker", unknown);
                }
                lookup.extend(fetched);
            }
            Err(e) => {
                log::warn!("issue lookup failed, showing entries without details: {}", e);
            }
        }
    }

    attach_issues(entries, &lookup)
}
