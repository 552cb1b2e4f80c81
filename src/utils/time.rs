//! Duration utilities: parsing user input (`1.5`, `1,5`, `01:30`) into
//! decimal hours and formatting decimal hours back as `HH:MM`.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

fn hhmm_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid duration regex"))
}

/// Parse a duration given either as `H:MM`/`HH:MM` or as decimal hours
/// (`.` or `,` as separator). Returns `None` for anything else, for
/// negative values and for `:MM` parts of 60 or more.
pub fn parse_duration(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = hhmm_re().captures(trimmed) {
        let hours: u32 = caps[1].parse().ok()?;
        let minutes: u32 = caps[2].parse().ok()?;
        if minutes >= 60 {
            return None;
        }
        return Some(hours as f64 + minutes as f64 / 60.0);
    }

    let normalized = trimmed.replacen(',', ".", 1);
    let decimal: f64 = normalized.parse().ok()?;
    if !decimal.is_finite() || decimal < 0.0 {
        return None;
    }

    Some(decimal)
}

/// Format decimal hours as `HH:MM`, rounding to the nearest minute.
pub fn format_duration(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    let sign = if total_minutes < 0 { "-" } else { "" };
    let m = total_minutes.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

/// Parse a duration that must be strictly positive (remote time entries).
pub fn parse_positive_duration(input: &str) -> AppResult<f64> {
    match parse_duration(input) {
        Some(h) if h > 0.0 => Ok(h),
        _ => Err(AppError::InvalidDuration(format!(
            "'{}' - please enter a valid duration (e.g., 1.5 or 01:30)",
            input
        ))),
    }
}

pub fn parse_optional_duration(input: Option<&String>) -> AppResult<Option<f64>> {
    if let Some(s) = input {
        let h = parse_duration(s).ok_or_else(|| {
            AppError::InvalidDuration(format!(
                "'{}' - please enter a valid duration (e.g., 1.5 or 01:30)",
                s
            ))
        })?;
        Ok(Some(h))
    } else {
        Ok(None)
    }
}
