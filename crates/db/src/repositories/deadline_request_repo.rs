//! Repository for the `task_deadline_requests` ledger.

use sqlx::PgPool;
use taskdesk_core::deadline::{ReviewDecision, TaskRef, STATUS_PENDING};
use taskdesk_core::types::{DbId, UserId};

use crate::models::deadline::{
    CreateDeadlineHistory, CreateDeadlineRequest, DeadlineRequest, DeadlineRequestWithTask,
    ReviewOutcome,
};
use crate::repositories::{DeadlineHistoryRepo, TaskRepo};

/// Column list for `task_deadline_requests` queries.
const COLUMNS: &str = "id, task_id, requested_by, requested_deadline, reason, status, \
    reviewed_by, reviewed_at, created_at";

/// Same columns qualified with the `r` alias, for joins.
const PREFIXED_COLUMNS: &str = "r.id, r.task_id, r.requested_by, r.requested_deadline, \
    r.reason, r.status, r.reviewed_by, r.reviewed_at, r.created_at";

/// Provides ledger operations for deadline revision requests.
pub struct DeadlineRequestRepo;

impl DeadlineRequestRepo {
    /// Insert a new pending request, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDeadlineRequest,
    ) -> Result<DeadlineRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO task_deadline_requests
                (task_id, requested_by, requested_deadline, reason, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeadlineRequest>(&query)
            .bind(input.task_id)
            .bind(input.requested_by)
            .bind(input.requested_deadline)
            .bind(&input.reason)
            .bind(STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DeadlineRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_deadline_requests WHERE id = $1");
        sqlx::query_as::<_, DeadlineRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a request together with its task's assigner and current timeline.
    pub async fn find_with_task(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DeadlineRequestWithTask>, sqlx::Error> {
        sqlx::query_as::<_, DeadlineRequestWithTask>(
            "SELECT r.id, r.task_id, r.requested_deadline, r.status,
                    t.assigned_by, t.timeline
             FROM task_deadline_requests r
             JOIN master_tasks t ON t.id = r.task_id
             WHERE r.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Move a pending request to its terminal status and apply the decision.
    ///
    /// Runs in one transaction:
    ///
    /// 1. Claim the request with a conditional update on `status = 'pending'`.
    /// 2. Lock the task row and read its current timeline.
    /// 3. On approval, write the requested deadline onto the task.
    /// 4. Append the `approved` / `rejected` history entry.
    ///
    /// Returns `None` when the request was not pending at step 1, i.e. it was
    /// already reviewed or a concurrent review won the race.
    pub async fn review(
        pool: &PgPool,
        request_id: DbId,
        decision: ReviewDecision,
        reviewer: UserId,
    ) -> Result<Option<ReviewOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE task_deadline_requests
             SET status = $2, reviewed_by = $3, reviewed_at = NOW()
             WHERE id = $1 AND status = $4
             RETURNING {COLUMNS}"
        );
        let claimed = sqlx::query_as::<_, DeadlineRequest>(&query)
            .bind(request_id)
            .bind(decision.resulting_status().as_str())
            .bind(reviewer)
            .bind(STATUS_PENDING)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(request) = claimed else {
            tx.rollback().await?;
            return Ok(None);
        };

        let task = TaskRef::assigned(request.task_id);
        let current = TaskRepo::find_deadline_for_update(&mut *tx, task)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        if decision.updates_timeline() {
            TaskRepo::set_timeline(&mut *tx, task, request.requested_deadline).await?;
        }

        // Review actions always apply to assigned tasks.
        let entry = CreateDeadlineHistory {
            task,
            action: decision.history_action(),
            old_deadline: current.timeline,
            new_deadline: request.requested_deadline,
            reason: None,
            changed_by: reviewer,
        };
        DeadlineHistoryRepo::append(&mut *tx, &entry).await?;

        tx.commit().await?;

        tracing::debug!(
            request_id,
            task_id = request.task_id,
            decision = %decision,
            "Deadline request review committed"
        );

        Ok(Some(ReviewOutcome {
            request,
            old_deadline: current.timeline,
        }))
    }

    /// Pending requests on tasks assigned by `reviewer`, oldest first.
    pub async fn list_pending_for_reviewer(
        pool: &PgPool,
        reviewer: UserId,
    ) -> Result<Vec<DeadlineRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {PREFIXED_COLUMNS}
             FROM task_deadline_requests r
             JOIN master_tasks t ON t.id = r.task_id
             WHERE t.assigned_by = $1 AND r.status = $2
             ORDER BY r.created_at ASC, r.id ASC"
        );
        sqlx::query_as::<_, DeadlineRequest>(&query)
            .bind(reviewer)
            .bind(STATUS_PENDING)
            .fetch_all(pool)
            .await
    }

    /// Every request submitted by `requester`, newest first.
    pub async fn list_for_requester(
        pool: &PgPool,
        requester: UserId,
    ) -> Result<Vec<DeadlineRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_deadline_requests
             WHERE requested_by = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, DeadlineRequest>(&query)
            .bind(requester)
            .fetch_all(pool)
            .await
    }
}
