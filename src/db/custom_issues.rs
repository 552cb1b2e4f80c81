use crate::core::ports::CustomIssueStore;
use crate::db::pool::DbPool;
use crate::db::users::ensure_user;
use crate::errors::{AppError, AppResult};
use crate::models::issue::CustomIssue;
use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use uuid::Uuid;

impl CustomIssueStore for DbPool {
    fn list_custom_issues(&self, owner_id: &str) -> AppResult<Vec<CustomIssue>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, issue_id, subject, created_at
             FROM custom_issue WHERE user_id = ?1 ORDER BY issue_id ASC",
        )?;
        let rows = stmt.query_map([owner_id], |row| {
            Ok(CustomIssue {
                id: row.get(0)?,
                owner_id: row.get(1)?,
                issue_id: row.get(2)?,
                subject: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn add_custom_issue(
        &self,
        owner_id: &str,
        issue_id: u32,
        subject: &str,
    ) -> AppResult<CustomIssue> {
        ensure_user(&self.conn, owner_id)?;

        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM custom_issue WHERE user_id = ?1 AND issue_id = ?2",
                params![owner_id, issue_id],
                |_| Ok(()),
            )
            .optional()?;
        if exists.is_some() {
            return Err(AppError::Validation(format!(
                "Issue #{issue_id} is already in your custom issues"
            )));
        }

        let issue = CustomIssue {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            issue_id,
            subject: subject.trim().to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        self.conn.execute(
            "INSERT INTO custom_issue (id, user_id, issue_id, subject, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                issue.id,
                issue.owner_id,
                issue.issue_id,
                issue.subject,
                issue.created_at
            ],
        )?;

        Ok(issue)
    }

    fn delete_custom_issue(&self, owner_id: &str, issue_id: u32) -> AppResult<()> {
        let deleted = self.conn.execute(
            "DELETE FROM custom_issue WHERE user_id = ?1 AND issue_id = ?2",
            params![owner_id, issue_id],
        )?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("Custom issue #{issue_id}")));
        }
        Ok(())
    }
}
