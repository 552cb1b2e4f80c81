//! Command handlers, one module per subcommand.

pub mod apikey;
pub mod calendar;
pub mod config;
pub mod custom_issue;
pub mod daily;
pub mod db;
pub mod entry;
pub mod init;
pub mod issues;
pub mod log;
pub mod login;
pub mod placeholder;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::cache::QueryCache;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::remote::client::RedmineClient;
use crate::session::Session;
use crate::ui::messages::warning;
use std::io::{self, Write};

/// What most commands need: the database, who is asking, and a cache
/// shared by the loads and mutations of this run.
pub struct AppContext {
    pub pool: DbPool,
    pub session: Session,
    pub cache: QueryCache,
}

impl AppContext {
    pub fn open(cli: &Cli, cfg: &Config) -> AppResult<Self> {
        let pool = DbPool::new(&cfg.database)?;
        let session = Session::resolve(cli.user.as_deref(), cfg, &pool)?;
        Ok(Self {
            pool,
            session,
            cache: QueryCache::from_config(cfg),
        })
    }

    /// HTTP client for the current session. Fails with a configuration
    /// error before any request when the base URL or key is missing.
    pub fn tracker(&self, cfg: &Config) -> AppResult<RedmineClient> {
        RedmineClient::from_session(cfg, &self.session)
    }

    /// Audit row; a failure here is reported but never fails the command.
    pub fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = ttlog(&self.pool.conn, operation, target, message) {
            ::log::warn!("failed to write internal log: {}", e);
        }
    }
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
