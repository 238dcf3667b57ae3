//! Task rows for the two task kinds that carry a deadline.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskdesk_core::types::{DbId, Deadline, Timestamp, UserId};

/// A row from the `self_tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SelfTask {
    pub id: DbId,
    pub user_id: UserId,
    pub task_name: String,
    pub timeline: Option<Deadline>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `master_tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignedTask {
    pub id: DbId,
    pub assigned_by: UserId,
    pub assigned_to: UserId,
    pub task_name: String,
    pub timeline: Option<Deadline>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a self task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSelfTask {
    pub user_id: UserId,
    pub task_name: String,
    pub timeline: Option<Deadline>,
}

/// DTO for creating an assigned task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignedTask {
    pub assigned_by: UserId,
    pub assigned_to: UserId,
    pub task_name: String,
    pub timeline: Option<Deadline>,
}

/// The deadline-relevant slice of a task of either kind.
///
/// `controller` is the user who may change or approve changes to the
/// deadline: the owner of a self task, the assigner of an assigned task.
#[derive(Debug, Clone, FromRow)]
pub struct TaskDeadline {
    pub id: DbId,
    pub controller: UserId,
    pub timeline: Option<Deadline>,
}
