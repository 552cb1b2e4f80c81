use crate::cli::commands::AppContext;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::users;
use crate::errors::AppResult;
use crate::remote::TrackerClient;
use crate::remote::client::RedmineClient;
use crate::session::SessionProvider;
use crate::ui::messages::{info, success, warning};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Apikey { set, verify, clear } = &cli.command {
        let ctx = AppContext::open(cli, cfg)?;
        let user = ctx.session.require_user()?;
        let conn = &ctx.pool.conn;

        if *clear {
            if users::clear_api_key(conn, &user)? {
                ctx.audit("apikey", &user, "API key removed");
                success(format!("API key removed for '{}'.", user));
            } else {
                info(format!("'{}' has no API key stored.", user));
            }
            return Ok(());
        }

        if let Some(key) = set {
            // check the key first when the server is known
            if *verify {
                let client = RedmineClient::with_key(cfg, key)?;
                let me = client.current_user()?;
                success(format!("Key belongs to {} ({}).", me.display_name(), me.login));
            }
            users::set_api_key(conn, &user, key)?;
            ctx.audit("apikey", &user, "API key stored");
            success(format!(
                "API key stored for '{}' ({}).",
                user,
                users::mask_api_key(key.trim())
            ));
            return Ok(());
        }

        if *verify {
            let client = ctx.tracker(cfg)?;
            let me = client.current_user()?;
            success(format!(
                "API key is valid: {} ({}, id {}).",
                me.display_name(),
                me.login,
                me.id
            ));
            return Ok(());
        }

        match users::get_api_key(conn, &user)? {
            Some(key) => info(format!("API key for '{}': {}", user, users::mask_api_key(&key))),
            None => warning(format!(
                "No API key for '{}'. Set it with `rtcal apikey --set <KEY>`.",
                user
            )),
        }
    }
    Ok(())
}
