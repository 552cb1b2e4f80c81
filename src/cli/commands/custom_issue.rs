use crate::cli::commands::AppContext;
use crate::cli::parser::{Cli, Commands, CustomIssueAction};
use crate::config::Config;
use crate::core::mutations;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::CustomIssue { action } = &cli.command else {
        return Ok(());
    };

    let ctx = AppContext::open(cli, cfg)?;

    match action {
        CustomIssueAction::Add { issue_id, subject } => {
            let added = mutations::add_custom_issue(&ctx.pool, &ctx.session, *issue_id, subject)?;
            ctx.audit(
                "custom_issue_add",
                &format!("#{}", added.issue_id),
                &added.subject,
            );
            success(format!("Custom issue #{} added: {}", added.issue_id, added.subject));
        }

        CustomIssueAction::Del { issue_id } => {
            mutations::delete_custom_issue(&ctx.pool, &ctx.session, *issue_id)?;
            ctx.audit(
                "custom_issue_del",
                &format!("#{}", issue_id),
                "Custom issue removed",
            );
            success(format!("Custom issue #{} removed.", issue_id));
        }

        CustomIssueAction::List => {
            let issues = mutations::list_custom_issues(&ctx.pool, &ctx.session)?;
            if issues.is_empty() {
                info("No custom issues yet. Add one with `rtcal custom-issue add <ID> <SUBJECT>`.");
                return Ok(());
            }

            let mut table = Table::new(vec![Column::right("ID", 8), Column::left("Subject", 60)]);
            for i in &issues {
                table.add_row(vec![format!("#{}", i.issue_id), i.subject.clone()]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}
