//! Unified application error type.
//! All modules (db, remote, core, cli, utils) return AppError to keep the
//! error handling consistent and easy to surface in the terminal.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid placeholder type: {0}")]
    InvalidPlaceholderKind(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // ---------------------------
    // Session / credentials
    // ---------------------------
    #[error("You must be logged in (run `rtcal login <user>` or pass --user)")]
    Unauthenticated,

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    // ---------------------------
    // Remote tracker
    // ---------------------------
    #[error("Redmine is unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Redmine rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Unexpected Redmine response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0} not found")]
    NotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return AppError::Other(format!("failed to decode Redmine response: {e}"));
        }
        // transport failures (connect, timeout, TLS) all surface the same way
        AppError::RemoteUnavailable(e.to_string())
    }
}

impl AppError {
    /// Errors that should send the user back to `login`/`apikey` rather than
    /// being shown as a plain failure.
    pub fn needs_credentials(&self) -> bool {
        matches!(
            self,
            AppError::Unauthenticated | AppError::Unauthorized(_) | AppError::Config(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
