//! Task lookups shared by the self and assigned deadline handlers.

use taskdesk_core::deadline::TaskRef;
use taskdesk_core::types::UserId;
use taskdesk_db::models::deadline::TaskDeadlineHistory;
use taskdesk_db::models::task::TaskDeadline;
use taskdesk_db::repositories::{DeadlineHistoryRepo, TaskRepo};
use taskdesk_db::DbPool;

use crate::error::AppResult;

/// Load a task's deadline and verify that `actor` controls it.
///
/// Missing tasks are `NotFound`. A task controlled by someone else is
/// `NotFound` for self tasks and `Forbidden` for assigned tasks.
pub async fn ensure_task_controlled_by(
    pool: &DbPool,
    task: TaskRef,
    actor: UserId,
) -> AppResult<TaskDeadline> {
    let deadline = TaskRepo::find_deadline(pool, task)
        .await?
        .ok_or_else(|| task.not_found())?;
    task.ensure_controlled_by(deadline.controller, actor)?;
    Ok(deadline)
}

/// Load the full deadline history of a task.
pub async fn load_history(pool: &DbPool, task: TaskRef) -> AppResult<TaskDeadlineHistory> {
    let history = DeadlineHistoryRepo::list_for_task(pool, task).await?;
    Ok(TaskDeadlineHistory {
        task_id: task.id,
        task_type: task.kind,
        history,
    })
}
