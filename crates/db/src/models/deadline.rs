//! Deadline request ledger and deadline history models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskdesk_core::deadline::{
    normalize_reason, parse_deadline, validate_history_action, HistoryAction, ReviewDecision,
    TaskKind, TaskRef,
};
use taskdesk_core::error::CoreError;
use taskdesk_core::types::{DbId, Deadline, Timestamp, UserId};
use validator::Validate;

// ---------------------------------------------------------------------------
// Request ledger
// ---------------------------------------------------------------------------

/// A row from the `task_deadline_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeadlineRequest {
    pub id: DbId,
    pub task_id: DbId,
    pub requested_by: UserId,
    pub requested_deadline: Deadline,
    pub reason: String,
    pub status: String,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A request joined with the assigned task it targets.
#[derive(Debug, Clone, FromRow)]
pub struct DeadlineRequestWithTask {
    pub id: DbId,
    pub task_id: DbId,
    pub requested_deadline: Deadline,
    pub status: String,
    pub assigned_by: UserId,
    pub timeline: Option<Deadline>,
}

/// DTO for inserting a new pending request.
#[derive(Debug, Clone)]
pub struct CreateDeadlineRequest {
    pub task_id: DbId,
    pub requested_by: UserId,
    pub requested_deadline: Deadline,
    pub reason: String,
}

/// Result of a successful review.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    /// The request after its transition to a terminal status.
    pub request: DeadlineRequest,
    /// The task's timeline at the moment of review.
    pub old_deadline: Option<Deadline>,
}

// ---------------------------------------------------------------------------
// History log
// ---------------------------------------------------------------------------

/// A row from the `task_deadline_history` table. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeadlineHistoryEntry {
    pub id: DbId,
    pub task_type: String,
    pub task_id: DbId,
    pub old_deadline: Option<Deadline>,
    pub new_deadline: Deadline,
    pub action: String,
    pub reason: Option<String>,
    pub changed_by: UserId,
    pub changed_at: Timestamp,
}

/// DTO for appending a history entry.
///
/// Only constructible through [`CreateDeadlineHistory::new`], which refuses
/// actions that do not apply to the task kind.
#[derive(Debug, Clone)]
pub struct CreateDeadlineHistory {
    pub(crate) task: TaskRef,
    pub(crate) action: HistoryAction,
    pub(crate) old_deadline: Option<Deadline>,
    pub(crate) new_deadline: Deadline,
    pub(crate) reason: Option<String>,
    pub(crate) changed_by: UserId,
}

impl CreateDeadlineHistory {
    pub fn new(
        task: TaskRef,
        action: HistoryAction,
        old_deadline: Option<Deadline>,
        new_deadline: Deadline,
        reason: Option<String>,
        changed_by: UserId,
    ) -> Result<Self, CoreError> {
        validate_history_action(task.kind, action)?;
        Ok(Self {
            task,
            action,
            old_deadline,
            new_deadline,
            reason,
            changed_by,
        })
    }
}

/// History of one task, as returned by the history endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDeadlineHistory {
    pub task_id: DbId,
    pub task_type: TaskKind,
    pub history: Vec<DeadlineHistoryEntry>,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Request body shared by the self revision and revision request endpoints.
///
/// Fields are optional at the serde level so a missing field surfaces as a
/// validation error rather than a JSON rejection.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviseDeadlineInput {
    #[validate(required(message = "task_id is required"))]
    pub task_id: Option<DbId>,
    #[validate(required(message = "new_deadline is required"))]
    pub new_deadline: Option<String>,
    #[validate(
        required(message = "reason is required"),
        length(min = 1, message = "reason must not be empty")
    )]
    pub reason: Option<String>,
}

/// A validated deadline change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineRevision {
    pub task_id: DbId,
    pub new_deadline: Deadline,
    pub reason: String,
}

impl ReviseDeadlineInput {
    /// Check required fields, parse the deadline and normalize the reason.
    pub fn into_revision(self) -> Result<DeadlineRevision, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        let (Some(task_id), Some(raw_deadline), Some(raw_reason)) =
            (self.task_id, self.new_deadline, self.reason)
        else {
            return Err(CoreError::Validation("Missing required fields".into()));
        };
        Ok(DeadlineRevision {
            task_id,
            new_deadline: parse_deadline(&raw_deadline)?,
            reason: normalize_reason(&raw_reason)?,
        })
    }
}

/// Request body for the review endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewDeadlineInput {
    #[validate(required(message = "request_id is required"))]
    pub request_id: Option<DbId>,
    #[validate(required(message = "decision is required"))]
    pub decision: Option<String>,
}

impl ReviewDeadlineInput {
    /// Check required fields and parse the decision.
    pub fn into_review(self) -> Result<(DbId, ReviewDecision), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        let (Some(request_id), Some(decision)) = (self.request_id, self.decision) else {
            return Err(CoreError::Validation("Missing required fields".into()));
        };
        Ok((request_id, ReviewDecision::parse(&decision)?))
    }
}
