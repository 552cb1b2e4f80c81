use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Migration markers live in it, so it
/// has to be created before anything else.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Users known to this installation; the id is the login name.
fn create_users_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id              TEXT PRIMARY KEY,
            redmine_api_key TEXT,
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL
        );
        "#,
    )
}

fn create_placeholder_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS time_placeholder (
            id         TEXT PRIMARY KEY,
            user_id    TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            type       TEXT NOT NULL CHECK(type IN ('Doctor','Vacation','Holiday','Sickday')),
            date       TEXT NOT NULL,
            duration   REAL NOT NULL CHECK(duration > 0 AND duration <= 24),
            note       TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_placeholder_user_date ON time_placeholder(user_id, date);
        "#,
    )
}

fn create_custom_issue_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS custom_issue (
            id         TEXT PRIMARY KEY,
            user_id    TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            issue_id   INTEGER NOT NULL,
            subject    TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE(user_id, issue_id)
        );
        "#,
    )
}

type Migration = (&'static str, &'static str, fn(&Connection) -> Result<()>);

const MIGRATIONS: &[Migration] = &[
    ("20250101_0001_users", "Created users table", create_users_table),
    (
        "20250101_0002_time_placeholder",
        "Created time_placeholder table",
        create_placeholder_table,
    ),
    (
        "20250101_0003_custom_issue",
        "Created custom_issue table",
        create_custom_issue_table,
    ),
];

/// Run all pending migrations. Returns how many were applied.
///
/// `quiet` suppresses the per-migration message (used on ordinary opens).
pub fn run_pending_migrations(conn: &Connection, quiet: bool) -> Result<usize> {
    ensure_log_table(conn)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    let mut applied = 0;
    for (version, message, apply) in MIGRATIONS {
        if migration_applied(conn, version)? {
            continue;
        }
        apply(conn)?;
        mark_applied(conn, version, message)?;
        applied += 1;
        log::debug!("migration {} applied", version);
        if !quiet {
            success(format!("Migration applied: {} → {}", version, message));
        }
    }

    Ok(applied)
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}
