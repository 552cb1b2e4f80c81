use crate::db::migrate::applied_versions;
use crate::db::placeholders::count_by_owner;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) USERS
    //
    let users: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    let with_key: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM users WHERE redmine_api_key IS NOT NULL",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Users:{} {}{}{} ({} with API key)",
        CYAN, RESET, GREEN, users, RESET, with_key
    );

    //
    // 3) PLACEHOLDERS
    //
    let per_owner = count_by_owner(&pool.conn)?;
    let total: i64 = per_owner.iter().map(|(_, n)| n).sum();
    println!("{}• Placeholders:{} {}{}{}", CYAN, RESET, GREEN, total, RESET);
    for (owner, n) in &per_owner {
        println!("    {}: {}", owner, n);
    }

    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row(
            "SELECT MIN(date), MAX(date) FROM time_placeholder",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;
    let (first, last) = range.unwrap_or((None, None));
    println!("{}• Placeholder dates:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    //
    // 4) CUSTOM ISSUES
    //
    let custom: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM custom_issue", [], |row| row.get(0))?;
    println!("{}• Custom issues:{} {}", CYAN, RESET, custom);

    //
    // 5) SCHEMA
    //
    let versions = applied_versions(&pool.conn)?;
    println!(
        "{}• Schema:{} {} migration(s), latest {}",
        CYAN,
        RESET,
        versions.len(),
        versions.last().map(String::as_str).unwrap_or("--")
    );

    println!();
    Ok(())
}

/// `PRAGMA integrity_check`; returns the problems found (empty when healthy).
pub fn integrity_check(pool: &DbPool) -> AppResult<Vec<String>> {
    let mut stmt = pool.conn.prepare("PRAGMA integrity_check")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    let results = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(results.into_iter().filter(|r| r != "ok").collect())
}

pub fn vacuum(pool: &DbPool) -> AppResult<()> {
    pool.conn.execute_batch("VACUUM;")?;
    Ok(())
}
