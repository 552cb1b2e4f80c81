use crate::cli::commands::AppContext;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::pipeline::CalendarLoader;
use crate::errors::{AppError, AppResult};
use crate::remote::fetcher::PagingPolicy;
use crate::ui::daily::render_day;
use crate::utils::date::{parse_date, today};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Daily { date } = &cli.command {
        let day = match date {
            Some(d) => parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => today(),
        };

        let ctx = AppContext::open(cli, cfg)?;
        let client = ctx.tracker(cfg)?;
        let loader = CalendarLoader::new(&client, &ctx.pool, &ctx.cache)
            .with_paging(PagingPolicy::from_config(cfg));

        // the whole month is loaded, only the day is shown
        let view = loader
            .load(day, &ctx.session)?
            .into_view()
            .ok_or_else(|| AppError::Other("daily load was superseded".into()))?;

        print!(
            "{}",
            render_day(&view, day, cfg.expected_daily_hours, cfg.high_workload_hours)
        );
    }
    Ok(())
}
