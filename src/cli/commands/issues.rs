use crate::cli::commands::AppContext;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::issues::{filter_issues, merge_issue_choices};
use crate::core::ports::CustomIssueStore;
use crate::errors::AppResult;
use crate::remote::{IssueQuery, MAX_PAGE_SIZE, TrackerClient};
use crate::ui::messages::{info, remote_failure};
use crate::utils::table::{Column, Table};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Issues { search, project } = &cli.command {
        let ctx = AppContext::open(cli, cfg)?;

        let query = IssueQuery {
            project_id: project.clone().or_else(|| cfg.redmine_project_id.clone()),
            limit: MAX_PAGE_SIZE,
            offset: 0,
        };

        // local choices are still listed when the tracker is out of reach
        let api = match ctx.tracker(cfg).and_then(|c| c.list_issues(&query)) {
            Ok(issues) => issues,
            Err(e) => {
                remote_failure(&e);
                Vec::new()
            }
        };

        let custom = match ctx.session.user_id() {
            Some(user) => ctx.pool.list_custom_issues(user)?,
            None => Vec::new(),
        };

        let all = merge_issue_choices(&api, &cfg.predefined_issues, &custom);
        let shown = filter_issues(&all, search.as_deref().unwrap_or(""));

        if shown.is_empty() {
            info("No matching issues.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::right("ID", 8),
            Column::left("Subject", 50),
            Column::left("Source", 10),
            Column::left("Status", 12),
        ]);
        for c in &shown {
            table.add_row(vec![
                format!("#{}", c.id),
                c.subject.clone(),
                c.source.label().to_string(),
                c.status.clone().unwrap_or_default(),
            ]);
        }
        print!("{}", table.render());
        println!("\n{} of {} issues", shown.len(), all.len());
    }
    Ok(())
}
