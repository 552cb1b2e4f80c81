//! Calendar loading: window → remote entries + placeholders → enrich → merge.

use crate::core::cache::{EntriesKey, PlaceholdersKey, QueryCache, RequestTicket};
use crate::core::enrich::enrich;
use crate::core::merge::{self, DayTotals};
use crate::core::ports::PlaceholderStore;
use crate::core::range::compute_visible_window;
use crate::errors::{AppError, AppResult};
use crate::models::calendar_entry::{CalendarEntry, DisplayTask};
use crate::models::date_window::DateWindow;
use crate::models::placeholder::PlaceholderEntry;
use crate::models::time_entry::{OwnerFilter, RemoteTimeEntry};
use crate::remote::TrackerClient;
use crate::remote::fetcher::{PagingPolicy, fetch_remote_entries};
use crate::session::SessionProvider;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use std::thread;

/// Everything the month grid and the daily list render.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarView {
    pub anchor: NaiveDate,
    pub window: DateWindow,
    pub tasks: Vec<DisplayTask>,
    pub placeholders: Vec<PlaceholderEntry>,
    pub entries: Vec<CalendarEntry>,
}

impl CalendarView {
    pub fn day_totals(&self, day: NaiveDate) -> DayTotals {
        merge::day_totals(&self.entries, day)
    }

    pub fn entries_for_day(&self, day: NaiveDate) -> Vec<&CalendarEntry> {
        merge::entries_for_day(&self.entries, day)
    }

    /// Remote entry count and hours inside the anchor's month.
    pub fn month_summary(&self) -> (usize, f64) {
        merge::month_remote_summary(&self.entries, self.anchor.year(), self.anchor.month())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Current(CalendarView),
    /// A newer load was started while this one ran; its result was dropped.
    Superseded,
}

impl LoadOutcome {
    pub fn into_view(self) -> Option<CalendarView> {
        match self {
            LoadOutcome::Current(view) => Some(view),
            LoadOutcome::Superseded => None,
        }
    }
}

pub struct CalendarLoader<'a> {
    client: &'a dyn TrackerClient,
    placeholders: &'a dyn PlaceholderStore,
    cache: &'a QueryCache,
    owner: OwnerFilter,
    paging: PagingPolicy,
}

impl<'a> CalendarLoader<'a> {
    pub fn new(
        client: &'a dyn TrackerClient,
        placeholders: &'a dyn PlaceholderStore,
        cache: &'a QueryCache,
    ) -> Self {
        Self {
            client,
            placeholders,
            cache,
            owner: OwnerFilter::Me,
            paging: PagingPolicy::default(),
        }
    }

    pub fn with_owner(mut self, owner: OwnerFilter) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_paging(mut self, paging: PagingPolicy) -> Self {
        self.paging = paging;
        self
    }

    /// Start a load for the month of `anchor`. Any earlier ticket is
    /// superseded from this point on.
    pub fn begin(&self, anchor: NaiveDate) -> RequestTicket {
        self.cache.begin(compute_visible_window(anchor))
    }

    pub fn load(&self, anchor: NaiveDate, session: &dyn SessionProvider) -> AppResult<LoadOutcome> {
        let ticket = self.begin(anchor);
        self.load_with_ticket(anchor, &ticket, session)
    }

    /// Run a load started with [`CalendarLoader::begin`].
    ///
    /// Remote entries are fetched on a scoped thread while placeholders are
    /// read on the calling thread; both are joined before enrichment.
    pub fn load_with_ticket(
        &self,
        anchor: NaiveDate,
        ticket: &RequestTicket,
        session: &dyn SessionProvider,
    ) -> AppResult<LoadOutcome> {
        let window = ticket.window;
        let client = self.client;
        let cache = self.cache;
        let owner = &self.owner;
        let paging = self.paging;

        let (remote, placeholders) = thread::scope(|s| {
            let handle = s.spawn(move || {
                cached_remote_entries(client, cache, ticket, &window, owner, paging)
            });

            let placeholders = self.placeholder_entries(ticket, &window, session);

            let remote = handle
                .join()
                .map_err(|_| AppError::Other("time entry fetch thread panicked".into()))
                .and_then(|r| r);
            (remote, placeholders)
        });

        let remote = remote?;
        let placeholders = placeholders?;

        if !self.cache.is_current(ticket) {
            return Ok(LoadOutcome::Superseded);
        }

        let tasks = enrich(self.client, self.cache, &remote);
        let entries = merge::merge(tasks.clone(), placeholders.as_ref().clone());

        let view = CalendarView {
            anchor,
            window,
            tasks,
            placeholders: placeholders.as_ref().clone(),
            entries,
        };

        Ok(match self.cache.complete(ticket, view).into_current() {
            Some(view) => LoadOutcome::Current(view),
            None => LoadOutcome::Superseded,
        })
    }

    fn placeholder_entries(
        &self,
        ticket: &RequestTicket,
        window: &DateWindow,
        session: &dyn SessionProvider,
    ) -> AppResult<Arc<Vec<PlaceholderEntry>>> {
        // anonymous sessions just see no placeholders
        let Some(owner_id) = session.current_user_id() else {
            return Ok(Arc::new(Vec::new()));
        };

        let key = PlaceholdersKey {
            owner_id,
            window: *window,
        };
        if let Some(hit) = self.cache.placeholders(&key) {
            log::debug!("placeholders for {} served from cache", window);
            return Ok(hit);
        }

        let loaded = Arc::new(self.placeholders.list_placeholders(&key.owner_id, window)?);
        if self.cache.is_current(ticket) {
            self.cache.store_placeholders(ticket, key, Arc::clone(&loaded));
        }
        Ok(loaded)
    }
}

fn cached_remote_entries(
    client: &dyn TrackerClient,
    cache: &QueryCache,
    ticket: &RequestTicket,
    window: &DateWindow,
    owner: &OwnerFilter,
    paging: PagingPolicy,
) -> AppResult<Arc<Vec<RemoteTimeEntry>>> {
    let key = EntriesKey {
        window: *window,
        owner: owner.clone(),
    };
    if let Some(hit) = cache.time_entries(&key) {
        log::debug!("time entries for {} served from cache", window);
        return Ok(hit);
    }

    let fetched = Arc::new(fetch_remote_entries(client, window, owner, paging)?);
    if cache.is_current(ticket) {
        cache.store_time_entries(ticket, key, Arc::clone(&fetched));
    }
    Ok(fetched)
}
