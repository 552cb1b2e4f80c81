use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

/// `login <user> [--api-key KEY]`: remember the user in the config file and
/// make sure it has a row in the database.
pub fn handle_login(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Login { login, api_key } = &cli.command {
        let login = login.trim();
        if login.is_empty() {
            return Err(AppError::Validation("User name must not be empty".into()));
        }

        let pool = DbPool::new(&cfg.database)?;
        users::ensure_user(&pool.conn, login)?;

        if let Some(key) = api_key {
            users::set_api_key(&pool.conn, login, key)?;
            success(format!("API key stored for '{}'.", login));
        }

        if cli.test {
            info("Test mode: configuration file not updated.");
        } else {
            let mut updated = cfg.clone();
            updated.current_user = Some(login.to_string());
            updated.save()?;
        }

        ttlog(&pool.conn, "login", login, "User selected")?;
        success(format!("Logged in as '{}'.", login));

        if users::get_api_key(&pool.conn, login)?.is_none() {
            warning("No Redmine API key stored yet. Set it with `rtcal apikey --set <KEY>`.");
        }
    }
    Ok(())
}

pub fn handle_logout(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Some(current) = cfg.current_user.clone() else {
        info("Nobody is logged in.");
        return Ok(());
    };

    if !cli.test {
        let mut updated = cfg.clone();
        updated.current_user = None;
        updated.save()?;
    }

    let pool = DbPool::new(&cfg.database)?;
    ttlog(&pool.conn, "logout", &current, "User deselected")?;
    success(format!("Logged out '{}'.", current));
    Ok(())
}
