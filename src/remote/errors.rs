//! Mapping of Redmine HTTP failures onto `AppError`.

use super::wire::ErrorsResponse;
use crate::errors::AppError;
use reqwest::StatusCode;

/// Classify a non-success status into the error the view layer shows.
///
/// 401/403 → `Unauthorized`, 429 → `RateLimited`, 404 → `NotFound`,
/// 400/422 → `Validation`, everything else → `RemoteUnavailable`.
pub fn from_status(status: StatusCode, body: &str, what: &str) -> AppError {
    let reason = status.canonical_reason().unwrap_or("Unknown");
    let detail = error_detail(body);

    match status.as_u16() {
        401 => AppError::Unauthorized(
            "Redmine rejected the API key. Check it with `rtcal apikey --verify`.".into(),
        ),
        403 => AppError::Unauthorized(format!("you are not allowed to access {what}")),
        404 => AppError::NotFound(what.to_string()),
        429 => AppError::RateLimited(format!(
            "HTTP 429 {reason}. Please wait a couple of minutes before trying again."
        )),
        400 | 422 => AppError::Validation(if detail.is_empty() {
            format!("Redmine refused {what} (HTTP {})", status.as_u16())
        } else {
            detail
        }),
        _ => {
            let mut msg = format!("Redmine API error: {} {}", status.as_u16(), reason);
            if !detail.is_empty() {
                msg.push_str(" - ");
                msg.push_str(&detail);
            }
            AppError::RemoteUnavailable(msg)
        }
    }
}

/// Redmine's `errors[]` joined, or the raw body trimmed to something printable.
fn error_detail(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorsResponse>(body)
        && !parsed.errors.is_empty()
    {
        return parsed.errors.join("; ");
    }

    let trimmed = body.trim();
    if trimmed.len() > 200 {
        let mut cut: String = trimmed.chars().take(197).collect();
        cut.push_str("...");
        cut
    } else {
        trimmed.to_string()
    }
}
