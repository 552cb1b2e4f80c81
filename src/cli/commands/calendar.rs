use crate::cli::commands::AppContext;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::pipeline::{CalendarLoader, CalendarView, LoadOutcome};
use crate::core::range::{next_day, next_month, previous_day, previous_month};
use crate::errors::{AppError, AppResult};
use crate::remote::fetcher::PagingPolicy;
use crate::session::Session;
use crate::ui::calendar::{GridStyle, render_month};
use crate::ui::daily::render_day;
use crate::ui::messages::{info, remote_failure, warning};
use crate::utils::date::{parse_anchor, parse_date, parse_month, today};
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

fn style(cfg: &Config) -> GridStyle {
    GridStyle {
        expected_hours: cfg.expected_daily_hours,
        high_workload_hours: cfg.high_workload_hours,
        separator: cfg.separator_char.clone(),
    }
}

fn load(loader: &CalendarLoader, anchor: NaiveDate, session: &Session) -> AppResult<CalendarView> {
    match loader.load(anchor, session)? {
        LoadOutcome::Current(view) => Ok(view),
        // a single-threaded run never starts a second load meanwhile
        LoadOutcome::Superseded => Err(AppError::Other("calendar load was superseded".into())),
    }
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Calendar {
        month,
        date,
        interactive,
    } = &cli.command
    {
        let anchor = match (month, date) {
            (Some(m), _) => parse_month(m).ok_or_else(|| AppError::InvalidDate(m.clone()))?,
            (None, Some(d)) => parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            (None, None) => today(),
        };

        let ctx = AppContext::open(cli, cfg)?;
        if ctx.session.user_id().is_none() {
            warning("No user selected; placeholders are not shown. Use `rtcal login <user>`.");
        }
        let client = ctx.tracker(cfg)?;
        let loader = CalendarLoader::new(&client, &ctx.pool, &ctx.cache)
            .with_paging(PagingPolicy::from_config(cfg));

        if *interactive {
            return run_interactive(&loader, &ctx.session, cfg, anchor);
        }

        let view = load(&loader, anchor, &ctx.session)?;
        print!("{}", render_month(&view, &style(cfg), today()));
    }
    Ok(())
}

enum Mode {
    Month,
    Day,
}

/// Read navigation commands from stdin until `q` or end of input.
/// Load failures are shown and the loop keeps going.
fn run_interactive(
    loader: &CalendarLoader,
    session: &Session,
    cfg: &Config,
    start: NaiveDate,
) -> AppResult<()> {
    let stdin = io::stdin();
    let mut anchor = start;
    let mut mode = Mode::Month;

    loop {
        match load(loader, anchor, session) {
            Ok(view) => match mode {
                Mode::Month => print!("{}", render_month(&view, &style(cfg), today())),
                Mode::Day => print!(
                    "{}",
                    render_day(
                        &view,
                        anchor,
                        cfg.expected_daily_hours,
                        cfg.high_workload_hours
                    )
                ),
            },
            Err(e) => {
                remote_failure(&e);
                // nothing to navigate without credentials
                if e.needs_credentials() {
                    return Err(e);
                }
            }
        }

        match mode {
            Mode::Month => print!("\n[p]rev [n]ext [t]oday [d DATE] day [q]uit > "),
            Mode::Day => print!("\n[p]rev day [n]ext day [m]onth [t]oday [q]uit > "),
        }
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match (cmd, &mode) {
            ("q", _) => return Ok(()),
            ("t", _) => anchor = today(),
            ("p", Mode::Month) => anchor = previous_month(anchor),
            ("n", Mode::Month) => anchor = next_month(anchor),
            ("p", Mode::Day) => anchor = previous_day(anchor),
            ("n", Mode::Day) => anchor = next_day(anchor),
            ("m", Mode::Day) => mode = Mode::Month,
            ("d", _) => match parts.next().map(parse_anchor) {
                Some(Ok(day)) => {
                    anchor = day;
                    mode = Mode::Day;
                }
                Some(Err(e)) => warning(e),
                None => {
                    mode = Mode::Day;
                }
            },
            ("", _) => {}
            (other, _) => info(format!("Unknown command '{}'", other)),
        }
    }
}
