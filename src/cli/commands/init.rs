use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with all migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    println!("⚙️  Initializing rtcal…");

    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = cfg.database.clone();

    let pool = DbPool::new(&db_path)?;
    let versions = applied_versions(&pool.conn)?;

    println!(
        "✅ Database initialized at {} ({} migrations)",
        &db_path,
        versions.len()
    );

    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    if cfg.redmine_base_url.is_none() {
        println!("👉 Next: set `redmine_base_url` with `rtcal config --edit`, then `rtcal login <user> --api-key <KEY>`.");
    }

    println!("🎉 rtcal initialization completed!");
    Ok(())
}
