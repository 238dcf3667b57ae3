use axum::routing::{get, post};
use axum::Router;

use crate::handlers::revise_self_deadline;
use crate::state::AppState;

/// Routes mounted at `/revise-self-deadline`.
///
/// ```text
/// POST   /                    revise_self_deadline
/// GET    /{task_id}           get_self_task_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(revise_self_deadline::revise_self_deadline))
        .route(
            "/{task_id}",
            get(revise_self_deadline::get_self_task_history),
        )
}
