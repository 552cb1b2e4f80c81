//! Query cache for the calendar pipeline.
//!
//! Three partitions with time-to-live eviction:
//! - remote time entries, keyed by window + owner filter
//! - issue metadata, keyed by issue id
//! - placeholders, keyed by owner + window
//!
//! Loads are guarded by request generations: every load takes a ticket
//! from [`QueryCache::begin`] and only the latest ticket may publish its
//! result ("latest request wins"). Invalidating a partition while a load is
//! in flight keeps that load from writing its now outdated data back, and
//! windows stored under an older epoch are never served.

use crate::config::Config;
use crate::models::date_window::DateWindow;
use crate::models::issue::IssueMetadata;
use crate::models::placeholder::PlaceholderEntry;
use crate::models::time_entry::{OwnerFilter, RemoteTimeEntry};
use moka::sync::Cache;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const DEFAULT_ENTRIES_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_ISSUES_TTL: Duration = Duration::from_secs(600);

const MAX_WINDOWS: u64 = 64;
const MAX_ISSUES: u64 = 5_000;

/// What a mutation invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Time entries and issue metadata (anything fetched from the tracker).
    Remote,
    Placeholders,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntriesKey {
    pub window: DateWindow,
    pub owner: OwnerFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceholdersKey {
    pub owner_id: String,
    pub window: DateWindow,
}

/// Handed out by [`QueryCache::begin`]; identifies one load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub generation: u64,
    pub window: DateWindow,
    remote_epoch: u64,
    placeholder_epoch: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion<T> {
    /// The ticket is still the latest one; the value may be shown.
    Current(T),
    /// A newer load started meanwhile; the value was discarded.
    Stale { generation: u64, latest: u64 },
}

impl<T> Completion<T> {
    pub fn into_current(self) -> Option<T> {
        match self {
            Completion::Current(v) => Some(v),
            Completion::Stale { .. } => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Completion::Stale { .. })
    }
}

pub struct QueryCache {
    // values carry the partition epoch they were stored under
    time_entries: Cache<EntriesKey, (u64, Arc<Vec<RemoteTimeEntry>>)>,
    issues: Cache<u32, IssueMetadata>,
    placeholders: Cache<PlaceholdersKey, (u64, Arc<Vec<PlaceholderEntry>>)>,
    generation: AtomicU64,
    remote_epoch: AtomicU64,
    placeholder_epoch: AtomicU64,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRIES_TTL, DEFAULT_ISSUES_TTL)
    }
}

impl QueryCache {
    pub fn new(entries_ttl: Duration, issues_ttl: Duration) -> Self {
        Self {
            time_entries: Cache::builder()
                .time_to_live(entries_ttl)
                .max_capacity(MAX_WINDOWS)
                .build(),
            issues: Cache::builder()
                .time_to_live(issues_ttl)
                .max_capacity(MAX_ISSUES)
                .build(),
            placeholders: Cache::builder()
                .time_to_live(entries_ttl)
                .max_capacity(MAX_WINDOWS)
                .build(),
            generation: AtomicU64::new(0),
            remote_epoch: AtomicU64::new(0),
            placeholder_epoch: AtomicU64::new(0),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            Duration::from_secs(cfg.time_entries_ttl_secs),
            Duration::from_secs(cfg.issues_ttl_secs),
        )
    }

    // ---------------------------
    // Request generations
    // ---------------------------

    /// Start a load for `window`. Any ticket handed out before becomes stale.
    pub fn begin(&self, window: DateWindow) -> RequestTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            generation,
            window,
            remote_epoch: self.remote_epoch.load(Ordering::SeqCst),
            placeholder_epoch: self.placeholder_epoch.load(Ordering::SeqCst),
        }
    }

    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.latest_generation()
    }

    /// Publish `value` if `ticket` is still the latest request.
    pub fn complete<T>(&self, ticket: &RequestTicket, value: T) -> Completion<T> {
        let latest = self.latest_generation();
        if ticket.generation == latest {
            Completion::Current(value)
        } else {
            log::debug!(
                "discarding result of request {} for {} (latest is {})",
                ticket.generation,
                ticket.window,
                latest
            );
            Completion::Stale {
                generation: ticket.generation,
                latest,
            }
        }
    }

    // ---------------------------
    // Time entries
    // ---------------------------

    pub fn time_entries(&self, key: &EntriesKey) -> Option<Arc<Vec<RemoteTimeEntry>>> {
        let epoch = self.remote_epoch.load(Ordering::SeqCst);
        self.time_entries
            .get(key)
            .and_then(|(stored, entries)| (stored == epoch).then_some(entries))
    }

    /// Stores only when no remote invalidation happened since `ticket` began.
    pub fn store_time_entries(
        &self,
        ticket: &RequestTicket,
        key: EntriesKey,
        entries: Arc<Vec<RemoteTimeEntry>>,
    ) -> bool {
        if ticket.remote_epoch != self.remote_epoch.load(Ordering::SeqCst) {
            return false;
        }
        self.time_entries
            .insert(key.clone(), (ticket.remote_epoch, entries));
        // an invalidation may have landed between the check and the insert
        if ticket.remote_epoch != self.remote_epoch.load(Ordering::SeqCst) {
            self.time_entries.invalidate(&key);
            return false;
        }
        true
    }

    // ---------------------------
    // Issues
    // ---------------------------

    pub fn issue(&self, id: u32) -> Option<IssueMetadata> {
        self.issues.get(&id)
    }

    /// Split `ids` into cache hits and the ids still to fetch.
    pub fn lookup_issues(&self, ids: &[u32]) -> (HashMap<u32, IssueMetadata>, Vec<u32>) {
        let mut hits = HashMap::new();
        let mut misses = Vec::new();
        for &id in ids {
            match self.issues.get(&id) {
                Some(issue) => {
                    hits.insert(id, issue);
                }
                None => misses.push(id),
            }
        }
        (hits, misses)
    }

    pub fn store_issues<'a>(&self, issues: impl IntoIterator<Item = &'a IssueMetadata>) {
        for issue in issues {
            self.issues.insert(issue.id, issue.clone());
        }
    }

    // ---------------------------
    // Placeholders
    // ---------------------------

    pub fn placeholders(&self, key: &PlaceholdersKey) -> Option<Arc<Vec<PlaceholderEntry>>> {
        let epoch = self.placeholder_epoch.load(Ordering::SeqCst);
        self.placeholders
            .get(key)
            .and_then(|(stored, entries)| (stored == epoch).then_some(entries))
    }

    pub fn store_placeholders(
        &self,
        ticket: &RequestTicket,
        key: PlaceholdersKey,
        entries: Arc<Vec<PlaceholderEntry>>,
    ) -> bool {
        if ticket.placeholder_epoch != self.placeholder_epoch.load(Ordering::SeqCst) {
            return false;
        }
        self.placeholders
            .insert(key.clone(), (ticket.placeholder_epoch, entries));
        if ticket.placeholder_epoch != self.placeholder_epoch.load(Ordering::SeqCst) {
            self.placeholders.invalidate(&key);
            return false;
        }
        true
    }

    // ---------------------------
    // Invalidation
    // ---------------------------

    pub fn invalidate(&self, partition: Partition) {
        match partition {
            Partition::Remote => {
                self.remote_epoch.fetch_add(1, Ordering::SeqCst);
                self.time_entries.invalidate_all();
                self.issues.invalidate_all();
            }
            Partition::Placeholders => {
                self.placeholder_epoch.fetch_add(1, Ordering::SeqCst);
                self.placeholders.invalidate_all();
            }
        }
        log::debug!("cache partition {:?} invalidated", partition);
    }
}

