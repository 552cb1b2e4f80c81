#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rtcal::errors::{AppError, AppResult};
use rtcal::models::issue::IssueMetadata;
use rtcal::models::placeholder::PlaceholderEntry;
use rtcal::models::placeholder_kind::PlaceholderKind;
use rtcal::models::time_entry::{
    EntryTarget, IdRef, NamedRef, NewTimeEntry, RemoteTimeEntry, RemoteUser, TimeEntryPatch,
};
use rtcal::remote::{IssueQuery, TimeEntryPage, TimeEntryQuery, TrackerClient};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn rtc() -> Command {
    cargo_bin_cmd!("rtcal")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtcal.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// `rtcal --db <db> --test init`
pub fn init_db(db_path: &str) {
    rtc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn named(id: u32, name: &str) -> NamedRef {
    NamedRef {
        id,
        name: name.to_string(),
    }
}

pub fn remote_entry(id: u32, spent_on: NaiveDate, hours: f64, issue: Option<u32>) -> RemoteTimeEntry {
    RemoteTimeEntry {
        id,
        project: named(7, "Calendar"),
        issue: issue.map(|id| IdRef { id }),
        user: named(42, "Alice Example"),
        activity: named(9, "Development"),
        hours,
        comments: Some(format!("work {id}")),
        spent_on,
        created_on: None,
        updated_on: None,
    }
}

pub fn issue(id: u32, subject: &str) -> IssueMetadata {
    IssueMetadata {
        id,
        subject: subject.to_string(),
        tracker: named(1, "Task"),
        status: named(2, "In Progress"),
        priority: Some(named(3, "Normal")),
        project: named(7, "Calendar"),
        description: None,
    }
}

/// In-memory tracker with call counters.
#[derive(Default)]
pub struct FakeTracker {
    pub entries: Mutex<Vec<RemoteTimeEntry>>,
    pub issues: HashMap<u32, IssueMetadata>,
    pub fail_entries: bool,
    pub fail_issues: bool,
    pub list_calls: AtomicUsize,
    pub issue_batches: Mutex<Vec<Vec<u32>>>,
    pub created: Mutex<Vec<NewTimeEntry>>,
    pub updated: Mutex<Vec<(u32, TimeEntryPatch)>>,
}

impl FakeTracker {
    pub fn with_entries(entries: Vec<RemoteTimeEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Default::default()
        }
    }

    pub fn with_issues(mut self, issues: Vec<IssueMetadata>) -> Self {
        self.issues = issues.into_iter().map(|i| (i.id, i)).collect();
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn batches(&self) -> Vec<Vec<u32>> {
        self.issue_batches.lock().unwrap().clone()
    }
}

impl TrackerClient for FakeTracker {
    fn list_time_entries(&self, query: &TimeEntryQuery) -> AppResult<TimeEntryPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_entries {
            return Err(AppError::RemoteUnavailable("connection refused".into()));
        }

        let all: Vec<RemoteTimeEntry> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.spent_on >= query.from && e.spent_on <= query.to)
            .cloned()
            .collect();

        let page: Vec<RemoteTimeEntry> = all
            .iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();

        Ok(TimeEntryPage {
            entries: page,
            total_count: all.len() as u32,
            offset: query.offset,
            limit: query.limit,
        })
    }

    fn get_time_entry(&self, id: u32) -> AppResult<RemoteTimeEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("time entry {id}")))
    }

    fn create_time_entry(&self, entry: &NewTimeEntry) -> AppResult<RemoteTimeEntry> {
        let mut entries = self.entries.lock().unwrap();
        let id = 1000 + entries.len() as u32;
        let (issue, project_id) = match entry.target {
            EntryTarget::Issue(i) => (Some(IdRef { id: i }), 7),
            EntryTarget::Project(p) => (None, p),
        };
        let created = RemoteTimeEntry {
            id,
            project: named(project_id, "Calendar"),
            issue,
            user: named(42, "Alice Example"),
            activity: named(entry.activity_id, ""),
            hours: entry.hours,
            comments: Some(entry.comments.clone()),
            spent_on: entry.spent_on,
            created_on: None,
            updated_on: None,
        };
        entries.push(created.clone());
        self.created.lock().unwrap().push(entry.clone());
        Ok(created)
    }

    fn update_time_entry(&self, id: u32, patch: &TimeEntryPatch) -> AppResult<()> {
        self.get_time_entry(id)?;
        self.updated.lock().unwrap().push((id, patch.clone()));
        Ok(())
    }

    fn delete_time_entry(&self, id: u32) -> AppResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(AppError::NotFound(format!("time entry {id}")));
        }
        Ok(())
    }

    fn get_issues_by_ids(&self, ids: &[u32]) -> AppResult<HashMap<u32, IssueMetadata>> {
        self.issue_batches.lock().unwrap().push(ids.to_vec());
        if self.fail_issues {
            return Err(AppError::RateLimited("HTTP 429".into()));
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.issues.get(id).map(|i| (*id, i.clone())))
            .collect())
    }

    fn list_issues(&self, _query: &IssueQuery) -> AppResult<Vec<IssueMetadata>> {
        let mut all: Vec<IssueMetadata> = self.issues.values().cloned().collect();
        all.sort_by_key(|i| i.id);
        Ok(all)
    }

    fn current_user(&self) -> AppResult<RemoteUser> {
        Ok(RemoteUser {
            id: 42,
            login: "alice".into(),
            firstname: "Alice".into(),
            lastname: "Example".into(),
        })
    }
}

pub fn placeholder(id: &str, date: NaiveDate, kind: PlaceholderKind, hours: f64) -> PlaceholderEntry {
    PlaceholderEntry {
        id: id.to_string(),
        owner_id: "alice".to_string(),
        kind,
        date,
        duration_hours: hours,
        note: None,
        created_at: "2024-01-01T00:00:00+00:00".to_string(),
        updated_at: "2024-01-01T00:00:00+00:00".to_string(),
    }
}
