use crate::cli::commands::AppContext;
use crate::cli::parser::{Cli, Commands, PlaceholderAction};
use crate::config::Config;
use crate::core::mutations;
use crate::core::ports::PlaceholderStore;
use crate::core::range::month_bounds;
use crate::db::placeholders::resolve_placeholder_id;
use crate::errors::{AppError, AppResult};
use crate::models::date_window::DateWindow;
use crate::models::placeholder::{NewPlaceholder, PlaceholderPatch};
use crate::models::placeholder_kind::PlaceholderKind;
use crate::session::SessionProvider;
use crate::ui::messages::{header, info, success};
use crate::utils::date::{month_title, parse_month, parse_optional_date, today};
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_duration, parse_optional_duration};

fn parse_kind(code: &str) -> AppResult<PlaceholderKind> {
    PlaceholderKind::from_code(code).ok_or_else(|| AppError::InvalidPlaceholderKind(code.to_string()))
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Placeholder { action } = &cli.command else {
        return Ok(());
    };

    let ctx = AppContext::open(cli, cfg)?;

    match action {
        PlaceholderAction::Add {
            kind,
            date,
            hours,
            note,
        } => {
            let kind = parse_kind(kind)?;
            let day = parse_optional_date(date.as_ref())?.unwrap_or_else(today);

            let mut fields = NewPlaceholder::with_default_duration(kind, day);
            if let Some(h) = parse_optional_duration(hours.as_ref())? {
                fields.duration_hours = h;
            }
            fields.note = note.clone();

            let created =
                mutations::create_placeholder(&ctx.pool, &ctx.cache, &ctx.session, &fields)?;

            ctx.audit(
                "placeholder_add",
                &created.id,
                &format!(
                    "{} {} on {}",
                    created.kind.to_db_str(),
                    format_duration(created.duration_hours),
                    created.date
                ),
            );
            success(format!(
                "{} {} added on {} ({}) [id {}]",
                created.kind.icon(),
                created.kind.to_db_str(),
                created.date,
                format_duration(created.duration_hours),
                created.id.chars().take(8).collect::<String>()
            ));
        }

        PlaceholderAction::Edit {
            id,
            kind,
            date,
            hours,
            note,
        } => {
            let owner = ctx.session.require_user()?;
            let full_id = resolve_placeholder_id(&ctx.pool, &owner, id)?;

            let patch = PlaceholderPatch {
                kind: kind.as_deref().map(parse_kind).transpose()?,
                date: parse_optional_date(date.as_ref())?,
                duration_hours: parse_optional_duration(hours.as_ref())?,
                note: note.clone(),
            };

            let updated =
                mutations::update_placeholder(&ctx.pool, &ctx.cache, &ctx.session, &full_id, &patch)?;

            ctx.audit("placeholder_edit", &updated.id, "Placeholder updated");
            success(format!(
                "Placeholder updated: {} on {} ({}).",
                updated.kind.to_db_str(),
                updated.date,
                format_duration(updated.duration_hours)
            ));
        }

        PlaceholderAction::Del { id } => {
            let owner = ctx.session.require_user()?;
            let full_id = resolve_placeholder_id(&ctx.pool, &owner, id)?;

            mutations::delete_placeholder(&ctx.pool, &ctx.cache, &ctx.session, &full_id)?;

            ctx.audit("placeholder_del", &full_id, "Placeholder deleted");
            success("Placeholder deleted.");
        }

        PlaceholderAction::List { month } => {
            let owner = ctx.session.require_user()?;
            let anchor = match month {
                Some(m) => parse_month(m).ok_or_else(|| AppError::InvalidDate(m.clone()))?,
                None => today(),
            };
            let (first, last) = month_bounds(anchor);
            let rows = ctx
                .pool
                .list_placeholders(&owner, &DateWindow::new(first, last))?;

            if rows.is_empty() {
                info(format!("No placeholders in {}.", month_title(anchor)));
                return Ok(());
            }

            header(format!("Placeholders of {} for {}", owner, month_title(anchor)));
            let mut table = Table::new(vec![
                Column::left("ID", 8),
                Column::left("Date", 10),
                Column::left("Kind", 10),
                Column::right("Time", 6),
                Column::left("Note", 30),
            ]);
            for p in &rows {
                table.add_row(vec![
                    p.id.chars().take(8).collect(),
                    p.date_str(),
                    p.kind.to_db_str().to_string(),
                    format_duration(p.duration_hours),
                    p.note.clone().unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());

            let total: f64 = rows.iter().map(|p| p.duration_hours).sum();
            println!("\nTotal: {}", format_duration(total));
        }
    }

    Ok(())
}
