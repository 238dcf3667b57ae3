//! Deadline revision domain rules.
//!
//! Covers the two task kinds whose deadlines can be revised, the lifecycle of
//! a revision request (`pending -> approved | rejected`), the actions recorded
//! in the deadline history log, and the input validation shared by the DB and
//! API layers.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Deadline, UserId};

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Maximum length (in characters) of a revision reason.
pub const MAX_REASON_LENGTH: usize = 2_000;

/// Wire and display format for deadlines.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

pub const ACTION_REQUESTED: &str = "requested";
pub const ACTION_APPROVED: &str = "approved";
pub const ACTION_REJECTED: &str = "rejected";
pub const ACTION_PUSHED: &str = "pushed";

/// Decisions a reviewer may submit.
pub const VALID_DECISIONS: &[&str] = &[STATUS_APPROVED, STATUS_REJECTED];

/* --------------------------------------------------------------------------
Task references
-------------------------------------------------------------------------- */

/// The two physically separate kinds of task that carry a deadline.
///
/// The serialized names (`self`, `master`) are what the history log stores in
/// its `task_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// A task a user created for themselves; the owner edits it directly.
    #[serde(rename = "self")]
    SelfOwned,
    /// A task assigned by one user to another; deadline changes need the
    /// assigner's approval.
    #[serde(rename = "master")]
    Assigned,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::SelfOwned => "self",
            TaskKind::Assigned => "master",
        }
    }

    /// Entity name used in `NotFound` errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            TaskKind::SelfOwned => "SelfTask",
            TaskKind::Assigned => "AssignedTask",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to a task of either kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TaskRef {
    pub kind: TaskKind,
    pub id: DbId,
}

impl TaskRef {
    pub fn self_owned(id: DbId) -> Self {
        Self {
            kind: TaskKind::SelfOwned,
            id,
        }
    }

    pub fn assigned(id: DbId) -> Self {
        Self {
            kind: TaskKind::Assigned,
            id,
        }
    }

    pub fn not_found(self) -> CoreError {
        CoreError::not_found(self.kind.entity_name(), self.id)
    }

    /// Check that `actor` controls this task's deadline.
    ///
    /// The controller is the owner of a self task or the assigner of an
    /// assigned task. Self tasks are only ever looked up through their owner,
    /// so a foreign self task reads as missing rather than forbidden.
    pub fn ensure_controlled_by(self, controller: UserId, actor: UserId) -> Result<(), CoreError> {
        if controller == actor {
            return Ok(());
        }
        match self.kind {
            TaskKind::SelfOwned => Err(self.not_found()),
            TaskKind::Assigned => Err(CoreError::Forbidden(
                "Only the user who assigned this task can manage its deadline".into(),
            )),
        }
    }
}

/* --------------------------------------------------------------------------
Request lifecycle
-------------------------------------------------------------------------- */

/// Status of a deadline revision request. `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => STATUS_PENDING,
            RequestStatus::Approved => STATUS_APPROVED,
            RequestStatus::Rejected => STATUS_REJECTED,
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            STATUS_PENDING => Ok(RequestStatus::Pending),
            STATUS_APPROVED => Ok(RequestStatus::Approved),
            STATUS_REJECTED => Ok(RequestStatus::Rejected),
            other => Err(CoreError::Internal(format!(
                "Unknown deadline request status '{other}'"
            ))),
        }
    }
}

/// A reviewer's verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl ReviewDecision {
    /// Parse a decision from request input.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            STATUS_APPROVED => Ok(ReviewDecision::Approved),
            STATUS_REJECTED => Ok(ReviewDecision::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid decision '{other}'. Must be one of: {}",
                VALID_DECISIONS.join(", ")
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        self.resulting_status().as_str()
    }

    /// The terminal status the request moves to.
    pub fn resulting_status(self) -> RequestStatus {
        match self {
            ReviewDecision::Approved => RequestStatus::Approved,
            ReviewDecision::Rejected => RequestStatus::Rejected,
        }
    }

    pub fn history_action(self) -> HistoryAction {
        match self {
            ReviewDecision::Approved => HistoryAction::Approved,
            ReviewDecision::Rejected => HistoryAction::Rejected,
        }
    }

    /// Only an approval writes the requested deadline onto the task.
    pub fn updates_timeline(self) -> bool {
        matches!(self, ReviewDecision::Approved)
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fail with `Conflict` unless the stored status is still `pending`.
pub fn ensure_pending(status: &str) -> Result<(), CoreError> {
    match RequestStatus::parse(status)? {
        RequestStatus::Pending => Ok(()),
        RequestStatus::Approved | RequestStatus::Rejected => Err(CoreError::already_reviewed()),
    }
}

/* --------------------------------------------------------------------------
History actions
-------------------------------------------------------------------------- */

/// What a deadline history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Requested,
    Approved,
    Rejected,
    /// A unilateral change by the owner of a self task.
    Pushed,
}

impl HistoryAction {
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryAction::Requested => ACTION_REQUESTED,
            HistoryAction::Approved => ACTION_APPROVED,
            HistoryAction::Rejected => ACTION_REJECTED,
            HistoryAction::Pushed => ACTION_PUSHED,
        }
    }

    /// Whether this action can be recorded against a task of `kind`.
    pub fn allowed_for(self, kind: TaskKind) -> bool {
        match self {
            HistoryAction::Pushed => kind == TaskKind::SelfOwned,
            HistoryAction::Requested | HistoryAction::Approved | HistoryAction::Rejected => {
                kind == TaskKind::Assigned
            }
        }
    }
}

/// Reject history entries whose action does not apply to the task kind.
pub fn validate_history_action(kind: TaskKind, action: HistoryAction) -> Result<(), CoreError> {
    if action.allowed_for(kind) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Action '{}' cannot be recorded for {} tasks",
            action.as_str(),
            kind.as_str()
        )))
    }
}

/* --------------------------------------------------------------------------
Input validation
-------------------------------------------------------------------------- */

/// Parse a deadline from request input.
///
/// Accepts a plain `YYYY-MM-DD` date, or an RFC 3339 timestamp whose UTC date
/// is taken.
pub fn parse_deadline(raw: &str) -> Result<Deadline, CoreError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DEADLINE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|ts| ts.naive_utc().date())
        .map_err(|_| {
            CoreError::Validation(format!(
                "Invalid deadline '{raw}'. Expected a date in YYYY-MM-DD format"
            ))
        })
}

/// Trim a revision reason and check it is non-blank and within length.
pub fn normalize_reason(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("reason must not be blank".into()));
    }
    if trimmed.chars().count() > MAX_REASON_LENGTH {
        return Err(CoreError::Validation(format!(
            "reason must be at most {MAX_REASON_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}
