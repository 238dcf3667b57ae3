//! Handlers for direct deadline revision of self tasks.
//!
//! The owner of a self task changes its deadline without approval. Each
//! change is recorded as a `pushed` history entry.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use taskdesk_core::deadline::{HistoryAction, TaskRef};
use taskdesk_core::types::DbId;
use taskdesk_db::models::deadline::{
    CreateDeadlineHistory, ReviseDeadlineInput, TaskDeadlineHistory,
};
use taskdesk_db::repositories::{DeadlineHistoryRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::task::ensure_task_controlled_by;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/v1/revise-self-deadline
///
/// Move the deadline of a self task owned by the caller. The history entry
/// is written before the task row; a failed task update leaves that entry
/// in place and surfaces as a 500.
pub async fn revise_self_deadline(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<ReviseDeadlineInput>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(input) = payload?;
    let revision = input.into_revision()?;
    let task = TaskRef::self_owned(revision.task_id);

    let current = ensure_task_controlled_by(&state.pool, task, auth.user_id).await?;

    let entry = CreateDeadlineHistory::new(
        task,
        HistoryAction::Pushed,
        current.timeline,
        revision.new_deadline,
        Some(revision.reason),
        auth.user_id,
    )?;
    DeadlineHistoryRepo::append(&state.pool, &entry).await?;

    match TaskRepo::set_timeline(&state.pool, task, revision.new_deadline).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::error!(
                user_id = %auth.user_id,
                task_id = task.id,
                "Self task vanished after its history entry was written"
            );
            return Err(AppError::InternalError(format!(
                "self task {} was not updated after its history entry was written",
                task.id
            )));
        }
        Err(err) => {
            tracing::error!(
                user_id = %auth.user_id,
                task_id = task.id,
                error = %err,
                "Failed to update self task timeline after writing history"
            );
            return Err(err.into());
        }
    }

    tracing::info!(
        user_id = %auth.user_id,
        task_id = task.id,
        old_deadline = ?current.timeline,
        new_deadline = %revision.new_deadline,
        "Self task deadline revised"
    );

    Ok(Json(MessageResponse::new("Deadline revised successfully")))
}

/// GET /api/v1/revise-self-deadline/{task_id}
///
/// Deadline changes the caller made to a self task, oldest first.
///
/// No task lookup: an unknown or foreign task id yields an empty history.
pub async fn get_self_task_history(
    auth: AuthUser,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<DataResponse<TaskDeadlineHistory>>> {
    let Path(task_id) = path?;
    let task = TaskRef::self_owned(task_id);

    let history =
        DeadlineHistoryRepo::list_for_task_by_actor(&state.pool, task, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: TaskDeadlineHistory {
            task_id: task.id,
            task_type: task.kind,
            history,
        },
    }))
}
