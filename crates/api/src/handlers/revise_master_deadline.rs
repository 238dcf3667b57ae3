//! Handlers for the assigned-task deadline revision workflow.
//!
//! An assignee asks for a new deadline, the assigner approves or rejects it.
//! Requests live in the `task_deadline_requests` ledger and every step is
//! recorded in the deadline history log.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use taskdesk_core::deadline::{ensure_pending, HistoryAction, ReviewDecision, TaskRef};
use taskdesk_core::error::CoreError;
use taskdesk_core::types::DbId;
use taskdesk_db::models::deadline::{
    CreateDeadlineHistory, CreateDeadlineRequest, DeadlineRequest, ReviewDeadlineInput,
    ReviseDeadlineInput, TaskDeadlineHistory,
};
use taskdesk_db::repositories::{DeadlineHistoryRepo, DeadlineRequestRepo, TaskRepo};

use crate::error::AppResult;
use crate::handlers::task::{ensure_task_controlled_by, load_history};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageDataResponse};
use crate::state::AppState;

/// POST /api/v1/revise-master-deadline/request
///
/// File a pending request to move an assigned task's deadline. The request
/// row is inserted first, then a `requested` history entry.
pub async fn request_deadline_revision(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<ReviseDeadlineInput>, JsonRejection>,
) -> AppResult<Json<MessageDataResponse<DeadlineRequest>>> {
    let Json(input) = payload?;
    let revision = input.into_revision()?;
    let task = TaskRef::assigned(revision.task_id);

    let current = TaskRepo::find_deadline(&state.pool, task)
        .await?
        .ok_or_else(|| task.not_found())?;

    let create = CreateDeadlineRequest {
        task_id: task.id,
        requested_by: auth.user_id,
        requested_deadline: revision.new_deadline,
        reason: revision.reason.clone(),
    };
    let request = DeadlineRequestRepo::create(&state.pool, &create).await?;

    let entry = CreateDeadlineHistory::new(
        task,
        HistoryAction::Requested,
        current.timeline,
        revision.new_deadline,
        Some(revision.reason),
        auth.user_id,
    )?;
    if let Err(err) = DeadlineHistoryRepo::append(&state.pool, &entry).await {
        tracing::error!(
            user_id = %auth.user_id,
            task_id = task.id,
            request_id = request.id,
            error = %err,
            "Failed to record history for a stored deadline request"
        );
        return Err(err.into());
    }

    tracing::info!(
        user_id = %auth.user_id,
        task_id = task.id,
        request_id = request.id,
        requested_deadline = %request.requested_deadline,
        "Deadline revision requested"
    );

    Ok(Json(MessageDataResponse {
        message: "Deadline revision request sent".to_string(),
        data: request,
    }))
}

/// POST /api/v1/revise-master-deadline/review
///
/// Approve or reject a pending request. Only the task's assigner may review.
/// Checks run in order: input, request existence, pending status, reviewer.
pub async fn review_deadline_request(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<ReviewDeadlineInput>, JsonRejection>,
) -> AppResult<Json<MessageDataResponse<DeadlineRequest>>> {
    let Json(input) = payload?;
    let (request_id, decision) = input.into_review()?;

    let pending = DeadlineRequestRepo::find_with_task(&state.pool, request_id)
        .await?
        .ok_or_else(|| CoreError::not_found("DeadlineRequest", request_id))?;
    ensure_pending(&pending.status)?;

    let task = TaskRef::assigned(pending.task_id);
    task.ensure_controlled_by(pending.assigned_by, auth.user_id)?;

    // A concurrent review may claim the request between the check above and here.
    let outcome = DeadlineRequestRepo::review(&state.pool, request_id, decision, auth.user_id)
        .await?
        .ok_or_else(CoreError::already_reviewed)?;

    tracing::info!(
        user_id = %auth.user_id,
        role = %auth.role,
        task_id = task.id,
        request_id,
        decision = %decision,
        old_deadline = ?outcome.old_deadline,
        requested_deadline = %outcome.request.requested_deadline,
        "Deadline request reviewed"
    );

    let message = match decision {
        ReviewDecision::Approved => "Request approved",
        ReviewDecision::Rejected => "Request rejected",
    };

    Ok(Json(MessageDataResponse {
        message: message.to_string(),
        data: outcome.request,
    }))
}

/// GET /api/v1/revise-master-deadline/{task_id}
///
/// Deadline history of an assigned task. Only its assigner may read it.
pub async fn get_assigned_task_history(
    auth: AuthUser,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<DataResponse<TaskDeadlineHistory>>> {
    let Path(task_id) = path?;
    let task = TaskRef::assigned(task_id);
    ensure_task_controlled_by(&state.pool, task, auth.user_id).await?;

    let history = load_history(&state.pool, task).await?;
    Ok(Json(DataResponse { data: history }))
}

/// GET /api/v1/revise-master-deadline/requests/pending
///
/// Pending requests on tasks the caller assigned, oldest first.
pub async fn list_pending_requests(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DeadlineRequest>>>> {
    let requests = DeadlineRequestRepo::list_pending_for_reviewer(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/revise-master-deadline/requests/mine
///
/// Every request the caller submitted, newest first.
pub async fn list_my_requests(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DeadlineRequest>>>> {
    let requests = DeadlineRequestRepo::list_for_requester(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: requests }))
}
