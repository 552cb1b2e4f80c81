//! Per-user rows: the login and the Redmine API key that goes with it.

use crate::errors::{AppError, AppResult};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

/// Insert the user if it does not exist yet.
pub fn ensure_user(conn: &Connection, login: &str) -> AppResult<()> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT OR IGNORE INTO users (id, redmine_api_key, created_at, updated_at)
         VALUES (?1, NULL, ?2, ?2)",
        params![login, now],
    )?;
    Ok(())
}

pub fn user_exists(conn: &Connection, login: &str) -> AppResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM users WHERE id = ?1", [login], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

pub fn get_api_key(conn: &Connection, login: &str) -> AppResult<Option<String>> {
    let key: Option<Option<String>> = conn
        .query_row(
            "SELECT redmine_api_key FROM users WHERE id = ?1",
            [login],
            |row| row.get(0),
        )
        .optional()?;
    Ok(key.flatten().filter(|k| !k.trim().is_empty()))
}

pub fn set_api_key(conn: &Connection, login: &str, api_key: &str) -> AppResult<()> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(AppError::Validation("API key must not be empty".into()));
    }
    ensure_user(conn, login)?;
    conn.execute(
        "UPDATE users SET redmine_api_key = ?1, updated_at = ?2 WHERE id = ?3",
        params![api_key, Utc::now().to_rfc3339(), login],
    )?;
    Ok(())
}

pub fn clear_api_key(conn: &Connection, login: &str) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE users SET redmine_api_key = NULL, updated_at = ?1
         WHERE id = ?2 AND redmine_api_key IS NOT NULL",
        params![Utc::now().to_rfc3339(), login],
    )?;
    Ok(changed > 0)
}

/// Show only the last four characters of a key.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
