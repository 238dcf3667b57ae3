use axum::routing::{get, post};
use axum::Router;

use crate::handlers::revise_master_deadline as handlers;
use crate::state::AppState;

/// Routes mounted at `/revise-master-deadline`.
///
/// ```text
/// POST   /request             request_deadline_revision
/// POST   /review              review_deadline_request
/// GET    /requests/pending    list_pending_requests
/// GET    /requests/mine       list_my_requests
/// GET    /{task_id}           get_assigned_task_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/request", post(handlers::request_deadline_revision))
        .route("/review", post(handlers::review_deadline_request))
        .route("/requests/pending", get(handlers::list_pending_requests))
        .route("/requests/mine", get(handlers::list_my_requests))
        .route("/{task_id}", get(handlers::get_assigned_task_history))
}
