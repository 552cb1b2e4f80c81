use crate::cli::commands::{AppContext, ask_confirmation};
use crate::cli::parser::{Cli, Commands, EntryAction};
use crate::config::Config;
use crate::core::mutations::{self, TimeEntryForm};
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::TimeEntryPatch;
use crate::ui::messages::{info, success};
use crate::utils::date::{parse_optional_date, today};
use crate::utils::time::{format_duration, parse_positive_duration};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Entry { action } = &cli.command else {
        return Ok(());
    };

    let ctx = AppContext::open(cli, cfg)?;

    match action {
        EntryAction::Add {
            issue,
            hours,
            comment,
            date,
            activity,
        } => {
            let form = TimeEntryForm {
                issue_id: Some(*issue),
                hours: hours.clone(),
                comments: comment.clone(),
                spent_on: Some(parse_optional_date(date.as_ref())?.unwrap_or_else(today)),
                activity_id: *activity,
            };
            // validate before the client is even built
            form.validate(cfg.default_activity)?;

            let client = ctx.tracker(cfg)?;
            let created = mutations::create_time_entry(
                &client,
                &ctx.cache,
                &ctx.session,
                &form,
                cfg.default_activity,
            )?;

            ctx.audit(
                "entry_add",
                &created.id.to_string(),
                &format!(
                    "#{} {} on {}",
                    issue,
                    format_duration(created.hours),
                    created.spent_on
                ),
            );
            let activity = cfg
                .activity_name(created.activity.id)
                .unwrap_or(created.activity.name.as_str());
            success(format!(
                "Time entry {} created: {} on #{} ({}, {}).",
                created.id,
                format_duration(created.hours),
                issue,
                activity,
                created.spent_on
            ));
        }

        EntryAction::Edit {
            id,
            issue,
            hours,
            comment,
            date,
            activity,
        } => {
            let patch = TimeEntryPatch {
                issue_id: *issue,
                hours: hours.as_deref().map(parse_positive_duration).transpose()?,
                comments: comment.clone(),
                spent_on: parse_optional_date(date.as_ref())?,
                activity_id: *activity,
            };
            if patch.is_empty() {
                return Err(AppError::Validation("Nothing to update".into()));
            }

            let client = ctx.tracker(cfg)?;
            mutations::update_time_entry(&client, &ctx.cache, &ctx.session, *id, &patch)?;

            ctx.audit("entry_edit", &id.to_string(), "Time entry updated");
            success(format!("Time entry {} updated.", id));
        }

        EntryAction::Del { id, yes } => {
            let client = ctx.tracker(cfg)?;
            if !*yes
                && !ask_confirmation(&format!(
                    "Delete time entry {} from Redmine? This action is irreversible.",
                    id
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }

            mutations::delete_time_entry(&client, &ctx.cache, &ctx.session, *id)?;

            ctx.audit("entry_del", &id.to_string(), "Time entry deleted");
            success(format!("Time entry {} deleted.", id));
        }

        EntryAction::Dup { id, date } => {
            let on = parse_optional_date(date.as_ref())?;
            let client = ctx.tracker(cfg)?;
            let created =
                mutations::duplicate_time_entry(&client, &ctx.cache, &ctx.session, *id, on)?;

            ctx.audit(
                "entry_dup",
                &created.id.to_string(),
                &format!("Copy of {} on {}", id, created.spent_on),
            );
            success(format!(
                "Time entry {} duplicated as {} on {}.",
                id, created.id, created.spent_on
            ));
        }
    }

    Ok(())
}
