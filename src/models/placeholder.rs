use super::placeholder_kind::PlaceholderKind;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::Serialize;

/// Hours a single placeholder may cover (exclusive lower, inclusive upper).
pub const MAX_PLACEHOLDER_HOURS: f64 = 24.0;

/// A locally stored, non-billable calendar entry (vacation, sick day, ...).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaceholderEntry {
    pub id: String,             // ⇔ time_placeholder.id (UUID v4)
    pub owner_id: String,       // ⇔ time_placeholder.user_id
    pub kind: PlaceholderKind,  // ⇔ time_placeholder.type
    pub date: NaiveDate,        // ⇔ time_placeholder.date (TEXT "YYYY-MM-DD")
    pub duration_hours: f64,    // ⇔ time_placeholder.duration (REAL)
    pub note: Option<String>,   // ⇔ time_placeholder.note
    pub created_at: String,     // ISO 8601
    pub updated_at: String,     // ISO 8601
}

impl PlaceholderEntry {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Fields of a placeholder about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlaceholder {
    pub kind: PlaceholderKind,
    pub date: NaiveDate,
    pub duration_hours: f64,
    pub note: Option<String>,
}

impl NewPlaceholder {
    /// Build with the kind's default duration.
    pub fn with_default_duration(kind: PlaceholderKind, date: NaiveDate) -> Self {
        Self {
            kind,
            date,
            duration_hours: kind.default_hours(),
            note: None,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        validate_placeholder_hours(self.duration_hours)
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceholderPatch {
    pub kind: Option<PlaceholderKind>,
    pub date: Option<NaiveDate>,
    pub duration_hours: Option<f64>,
    pub note: Option<String>,
}

impl PlaceholderPatch {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.date.is_none()
            && self.duration_hours.is_none()
            && self.note.is_none()
    }

    pub fn validate(&self) -> AppResult<()> {
        match self.duration_hours {
            Some(h) => validate_placeholder_hours(h),
            None => Ok(()),
        }
    }
}

pub fn validate_placeholder_hours(hours: f64) -> AppResult<()> {
    if !hours.is_finite() || hours <= 0.0 || hours > MAX_PLACEHOLDER_HOURS {
        return Err(AppError::Validation(
            "Duration must be between 0 and 24 hours".into(),
        ));
    }
    Ok(())
}
