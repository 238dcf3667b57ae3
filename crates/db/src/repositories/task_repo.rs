//! Repository for the `self_tasks` and `master_tasks` tables.
//!
//! Deadline-related queries take a [`TaskRef`] and pick the table from its
//! kind, so callers never branch on the task kind themselves.

use sqlx::{PgExecutor, PgPool};
use taskdesk_core::deadline::{TaskKind, TaskRef};
use taskdesk_core::types::{DbId, Deadline};

use crate::models::task::{AssignedTask, CreateAssignedTask, CreateSelfTask, SelfTask, TaskDeadline};

/// Column list for `self_tasks` queries.
const SELF_COLUMNS: &str = "id, user_id, task_name, timeline, status, created_at, updated_at";

/// Column list for `master_tasks` queries.
const ASSIGNED_COLUMNS: &str =
    "id, assigned_by, assigned_to, task_name, timeline, status, created_at, updated_at";

/// Table name and controlling user column for a task kind.
fn table_for(kind: TaskKind) -> (&'static str, &'static str) {
    match kind {
        TaskKind::SelfOwned => ("self_tasks", "user_id"),
        TaskKind::Assigned => ("master_tasks", "assigned_by"),
    }
}

/// Provides task lookups and deadline updates for both task kinds.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new self task, returning the created row.
    pub async fn create_self_task(
        pool: &PgPool,
        input: &CreateSelfTask,
    ) -> Result<SelfTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO self_tasks (user_id, task_name, timeline)
             VALUES ($1, $2, $3)
             RETURNING {SELF_COLUMNS}"
        );
        sqlx::query_as::<_, SelfTask>(&query)
            .bind(input.user_id)
            .bind(&input.task_name)
            .bind(input.timeline)
            .fetch_one(pool)
            .await
    }

    /// Insert a new assigned task, returning the created row.
    pub async fn create_assigned_task(
        pool: &PgPool,
        input: &CreateAssignedTask,
    ) -> Result<AssignedTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO master_tasks (assigned_by, assigned_to, task_name, timeline)
             VALUES ($1, $2, $3, $4)
             RETURNING {ASSIGNED_COLUMNS}"
        );
        sqlx::query_as::<_, AssignedTask>(&query)
            .bind(input.assigned_by)
            .bind(input.assigned_to)
            .bind(&input.task_name)
            .bind(input.timeline)
            .fetch_one(pool)
            .await
    }

    pub async fn find_self_task(pool: &PgPool, id: DbId) -> Result<Option<SelfTask>, sqlx::Error> {
        let query = format!("SELECT {SELF_COLUMNS} FROM self_tasks WHERE id = $1");
        sqlx::query_as::<_, SelfTask>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_assigned_task(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AssignedTask>, sqlx::Error> {
        let query = format!("SELECT {ASSIGNED_COLUMNS} FROM master_tasks WHERE id = $1");
        sqlx::query_as::<_, AssignedTask>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the current deadline and controlling user of a task.
    pub async fn find_deadline<'e, E>(
        executor: E,
        task: TaskRef,
    ) -> Result<Option<TaskDeadline>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let (table, controller) = table_for(task.kind);
        let query =
            format!("SELECT id, {controller} AS controller, timeline FROM {table} WHERE id = $1");
        sqlx::query_as::<_, TaskDeadline>(&query)
            .bind(task.id)
            .fetch_optional(executor)
            .await
    }

    /// Same as [`TaskRepo::find_deadline`] but takes a row lock until the
    /// surrounding transaction ends.
    pub async fn find_deadline_for_update<'e, E>(
        executor: E,
        task: TaskRef,
    ) -> Result<Option<TaskDeadline>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let (table, controller) = table_for(task.kind);
        let query = format!(
            "SELECT id, {controller} AS controller, timeline FROM {table} \
             WHERE id = $1 FOR UPDATE"
        );
        sqlx::query_as::<_, TaskDeadline>(&query)
            .bind(task.id)
            .fetch_optional(executor)
            .await
    }

    /// Overwrite a task's timeline. Returns `true` if a row was updated.
    pub async fn set_timeline<'e, E>(
        executor: E,
        task: TaskRef,
        deadline: Deadline,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let (table, _) = table_for(task.kind);
        let query = format!("UPDATE {table} SET timeline = $2 WHERE id = $1");
        let result = sqlx::query(&query)
            .bind(task.id)
            .bind(deadline)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
