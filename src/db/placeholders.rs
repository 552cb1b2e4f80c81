//! `time_placeholder` rows. Every query is filtered by owner; a row that
//! belongs to someone else is indistinguishable from a missing one.

use crate::core::ports::PlaceholderStore;
use crate::db::pool::DbPool;
use crate::db::users::ensure_user;
use crate::errors::{AppError, AppResult};
use crate::models::date_window::DateWindow;
use crate::models::placeholder::{NewPlaceholder, PlaceholderEntry, PlaceholderPatch};
use crate::models::placeholder_kind::PlaceholderKind;
use chrono::{NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

const COLUMNS: &str = "id, user_id, type, date, duration, note, created_at, updated_at";

fn map_row(row: &Row) -> rusqlite::Result<PlaceholderEntry> {
    let kind_str: String = row.get(2)?;
    let kind = PlaceholderKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            format!("unknown placeholder type '{kind_str}'").into(),
        )
    })?;

    let date_str: String = row.get(3)?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(PlaceholderEntry {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        kind,
        date,
        duration_hours: row.get(4)?,
        note: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn find_owned(conn: &Connection, owner_id: &str, id: &str) -> AppResult<PlaceholderEntry> {
    let sql = format!("SELECT {COLUMNS} FROM time_placeholder WHERE id = ?1 AND user_id = ?2");
    conn.query_row(&sql, params![id, owner_id], map_row)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("Placeholder {id}")))
}

fn clean_note(note: Option<&String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

impl PlaceholderStore for DbPool {
    fn list_placeholders(
        &self,
        owner_id: &str,
        window: &DateWindow,
    ) -> AppResult<Vec<PlaceholderEntry>> {
        let (from, to) = window.as_params();
        let sql = format!(
            "SELECT {COLUMNS} FROM time_placeholder
             WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date ASC, created_at ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![owner_id, from, to], map_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn create_placeholder(
        &self,
        owner_id: &str,
        fields: &NewPlaceholder,
    ) -> AppResult<PlaceholderEntry> {
        fields.validate()?;
        ensure_user(&self.conn, owner_id)?;

        let now = Utc::now().to_rfc3339();
        let entry = PlaceholderEntry {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            kind: fields.kind,
            date: fields.date,
            duration_hours: fields.duration_hours,
            note: clean_note(fields.note.as_ref()),
            created_at: now.clone(),
            updated_at: now,
        };

        self.conn.execute(
            "INSERT INTO time_placeholder (id, user_id, type, date, duration, note, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                entry.id,
                entry.owner_id,
                entry.kind.to_db_str(),
                entry.date_str(),
                entry.duration_hours,
                entry.note,
                entry.created_at,
                entry.updated_at
            ],
        )?;

        Ok(entry)
    }

    fn update_placeholder(
        &self,
        owner_id: &str,
        id: &str,
        patch: &PlaceholderPatch,
    ) -> AppResult<PlaceholderEntry> {
        patch.validate()?;
        let mut entry = find_owned(&self.conn, owner_id, id)?;

        if let Some(kind) = patch.kind {
            entry.kind = kind;
        }
        if let Some(date) = patch.date {
            entry.date = date;
        }
        if let Some(hours) = patch.duration_hours {
            entry.duration_hours = hours;
        }
        if patch.note.is_some() {
            entry.note = clean_note(patch.note.as_ref());
        }
        entry.updated_at = Utc::now().to_rfc3339();

        self.conn.execute(
            "UPDATE time_placeholder
             SET type = ?1, date = ?2, duration = ?3, note = ?4, updated_at = ?5
             WHERE id = ?6 AND user_id = ?7",
            params![
                entry.kind.to_db_str(),
                entry.date_str(),
                entry.duration_hours,
                entry.note,
                entry.updated_at,
                id,
                owner_id
            ],
        )?;

        Ok(entry)
    }

    fn delete_placeholder(&self, owner_id: &str, id: &str) -> AppResult<()> {
        let deleted = self.conn.execute(
            "DELETE FROM time_placeholder WHERE id = ?1 AND user_id = ?2",
            params![id, owner_id],
        )?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("Placeholder {id}")));
        }
        Ok(())
    }
}

/// Resolve a (possibly shortened) placeholder id among the owner's rows.
/// Ambiguous prefixes are rejected.
pub fn resolve_placeholder_id(pool: &DbPool, owner_id: &str, prefix: &str) -> AppResult<String> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Err(AppError::Validation("Placeholder id is required".into()));
    }

    let mut stmt = pool.conn.prepare(
        "SELECT id FROM time_placeholder
         WHERE user_id = ?1 AND substr(id, 1, length(?2)) = ?2
         LIMIT 2",
    )?;
    let ids = stmt
        .query_map(params![owner_id, prefix], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    match ids.as_slice() {
        [only] => Ok(only.clone()),
        [] => Err(AppError::NotFound(format!("Placeholder {prefix}"))),
        _ => Err(AppError::Validation(format!(
            "Placeholder id '{prefix}' is ambiguous, use more characters"
        ))),
    }
}

/// Number of placeholder rows per user (for `db --info`).
pub fn count_by_owner(conn: &Connection) -> AppResult<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, COUNT(*) FROM time_placeholder GROUP BY user_id ORDER BY user_id",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
