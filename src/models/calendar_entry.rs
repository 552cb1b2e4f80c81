use super::issue::IssueMetadata;
use super::placeholder::PlaceholderEntry;
use super::time_entry::RemoteTimeEntry;
use chrono::NaiveDate;
use serde::Serialize;

/// Activity id Redmine uses for development work.
pub const ACTIVITY_DEVELOPMENT: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaskType {
    Epic,
    Task,
    Bug,
    Feature,
}

impl TaskType {
    pub fn from_activity(activity_id: u32) -> Self {
        match activity_id {
            ACTIVITY_DEVELOPMENT => TaskType::Feature,
            _ => TaskType::Task,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Epic => "Epic",
            TaskType::Task => "Task",
            TaskType::Bug => "Bug",
            TaskType::Feature => "Feature",
        }
    }
}

/// A remote time entry as the calendar shows it, optionally enriched with
/// the metadata of the issue it is booked on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTask {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub duration: f64,
    pub task_type: TaskType,
    pub issue_id: Option<u32>,
    pub project_id: u32,
    pub activity_id: u32,
    pub issue_subject: Option<String>,
    pub issue_tracker: Option<String>,
    pub issue_status: Option<String>,
}

impl DisplayTask {
    /// Plain conversion, no issue metadata attached yet.
    pub fn from_remote(entry: &RemoteTimeEntry) -> Self {
        let title = match entry.comments() {
            "" => "Time entry".to_string(),
            c => c.to_string(),
        };

        Self {
            id: entry.id,
            title,
            description: format!("{} - {}", entry.activity.name, entry.project.name),
            date: entry.spent_on,
            duration: entry.hours,
            task_type: TaskType::from_activity(entry.activity.id),
            issue_id: entry.issue_id(),
            project_id: entry.project.id,
            activity_id: entry.activity.id,
            issue_subject: None,
            issue_tracker: None,
            issue_status: None,
        }
    }

    pub fn with_issue(mut self, issue: &IssueMetadata) -> Self {
        self.issue_subject = Some(issue.subject.clone());
        self.issue_tracker = Some(issue.tracker.name.clone());
        self.issue_status = Some(issue.status.name.clone());
        self
    }

    pub fn is_enriched(&self) -> bool {
        self.issue_subject.is_some()
    }

    /// `#186933`, or an empty string for entries booked on a project.
    pub fn issue_ref(&self) -> String {
        self.issue_id.map(|id| format!("#{id}")).unwrap_or_default()
    }
}

/// Everything the calendar and daily views render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CalendarEntry {
    Task(DisplayTask),
    Placeholder(PlaceholderEntry),
}

impl CalendarEntry {
    pub fn date(&self) -> NaiveDate {
        match self {
            CalendarEntry::Task(t) => t.date,
            CalendarEntry::Placeholder(p) => p.date,
        }
    }

    /// Hours counted towards daily and monthly totals (never negative).
    pub fn duration(&self) -> f64 {
        let hours = match self {
            CalendarEntry::Task(t) => t.duration,
            CalendarEntry::Placeholder(p) => p.duration_hours,
        };
        hours.max(0.0)
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, CalendarEntry::Placeholder(_))
    }

    pub fn as_task(&self) -> Option<&DisplayTask> {
        match self {
            CalendarEntry::Task(t) => Some(t),
            CalendarEntry::Placeholder(_) => None,
        }
    }
}

impl From<DisplayTask> for CalendarEntry {
    fn from(task: DisplayTask) -> Self {
        CalendarEntry::Task(task)
    }
}

impl From<PlaceholderEntry> for CalendarEntry {
    fn from(placeholder: PlaceholderEntry) -> Self {
        CalendarEntry::Placeholder(placeholder)
    }
}
