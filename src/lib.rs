//! rtcal library root.
//! Exposes the CLI parser, the high-level run() function, and the calendar
//! core (range, fetch, enrich, merge) for embedding and tests.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod remote;
pub mod session;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Login { .. } => cli::commands::login::handle_login(cli, cfg),
        Commands::Logout => cli::commands::login::handle_logout(cli, cfg),
        Commands::Apikey { .. } => cli::commands::apikey::handle(cli, cfg),
        Commands::Calendar { .. } => cli::commands::calendar::handle(cli, cfg),
        Commands::Daily { .. } => cli::commands::daily::handle(cli, cfg),
        Commands::Entry { .. } => cli::commands::entry::handle(cli, cfg),
        Commands::Placeholder { .. } => cli::commands::placeholder::handle(cli, cfg),
        Commands::Issues { .. } => cli::commands::issues::handle(cli, cfg),
        Commands::CustomIssue { .. } => cli::commands::custom_issue::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // RUST_LOG wins; otherwise only warnings and errors
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init()
        .ok();

    let cli = Cli::parse();

    // in test mode the user's config file is never read
    let mut cfg = if cli.test {
        let mut c = Config::default();
        c.apply_env_overrides();
        c
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = config::expand_path(custom_db).to_string_lossy().to_string();
    }

    log::debug!("using database {}", cfg.database);
    dispatch(&cli, &cfg)
}
