//! Who is using the calendar right now.
//!
//! The session is resolved once per run (from `--user` or the configured
//! `current_user`) and handed to whatever needs it; nothing reads it from
//! global state.

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::{AppError, AppResult};

pub trait SessionProvider {
    fn current_user_id(&self) -> Option<String>;

    /// The user id, or `Unauthenticated` when nobody is logged in.
    fn require_user(&self) -> AppResult<String> {
        self.current_user_id().ok_or(AppError::Unauthenticated)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    user_id: Option<String>,
    api_key: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(user_id: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            api_key,
        }
    }

    /// `--user` wins over the configured `current_user`. The user row is
    /// created on first use.
    pub fn resolve(cli_user: Option<&str>, cfg: &Config, pool: &DbPool) -> AppResult<Self> {
        let login = cli_user
            .map(str::to_string)
            .or_else(|| cfg.current_user.clone())
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        let Some(login) = login else {
            log::debug!("no user selected, running anonymously");
            return Ok(Self::anonymous());
        };

        users::ensure_user(&pool.conn, &login)?;
        let api_key = users::get_api_key(&pool.conn, &login)?;
        log::debug!(
            "session resolved for '{}' (api key: {})",
            login,
            if api_key.is_some() { "set" } else { "missing" }
        );

        Ok(Self {
            user_id: Some(login),
            api_key,
        })
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// The Redmine API key, or a configuration error telling the user how
    /// to set one. Distinct from an authorization failure.
    pub fn api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::Config(
                "Redmine API key is not configured. Please set your API key with `rtcal apikey --set <KEY>`.".into(),
            )
        })
    }
}

impl SessionProvider for Session {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}
