//! Repository for the append-only `task_deadline_history` table.
//!
//! No update or delete methods exist; the table's trigger rejects both.

use sqlx::{PgExecutor, PgPool};
use taskdesk_core::deadline::TaskRef;
use taskdesk_core::types::UserId;

use crate::models::deadline::{CreateDeadlineHistory, DeadlineHistoryEntry};

/// Column list for `task_deadline_history` queries.
const COLUMNS: &str = "id, task_type, task_id, old_deadline, new_deadline, action, \
    reason, changed_by, changed_at";

/// Provides append and read operations for the deadline history log.
pub struct DeadlineHistoryRepo;

impl DeadlineHistoryRepo {
    /// Append a history entry, returning the stored row.
    pub async fn append<'e, E>(
        executor: E,
        input: &CreateDeadlineHistory,
    ) -> Result<DeadlineHistoryEntry, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO task_deadline_history
                (task_type, task_id, old_deadline, new_deadline, action, reason, changed_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeadlineHistoryEntry>(&query)
            .bind(input.task.kind.as_str())
            .bind(input.task.id)
            .bind(input.old_deadline)
            .bind(input.new_deadline)
            .bind(input.action.as_str())
            .bind(&input.reason)
            .bind(input.changed_by)
            .fetch_one(executor)
            .await
    }

    /// List every entry for a task, oldest first.
    ///
    /// Entries written in one transaction share `changed_at`, so `id` breaks ties.
    pub async fn list_for_task(
        pool: &PgPool,
        task: TaskRef,
    ) -> Result<Vec<DeadlineHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_deadline_history
             WHERE task_type = $1 AND task_id = $2
             ORDER BY changed_at ASC, id ASC"
        );
        sqlx::query_as::<_, DeadlineHistoryEntry>(&query)
            .bind(task.kind.as_str())
            .bind(task.id)
            .fetch_all(pool)
            .await
    }

    /// Entries for a task written by `actor`, oldest first.
    pub async fn list_for_task_by_actor(
        pool: &PgPool,
        task: TaskRef,
        actor: UserId,
    ) -> Result<Vec<DeadlineHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_deadline_history
             WHERE task_type = $1 AND task_id = $2 AND changed_by = $3
             ORDER BY changed_at ASC, id ASC"
        );
        sqlx::query_as::<_, DeadlineHistoryEntry>(&query)
            .bind(task.kind.as_str())
            .bind(task.id)
            .bind(actor)
            .fetch_all(pool)
            .await
    }
}
