pub mod health;
pub mod revise_master_deadline;
pub mod revise_self_deadline;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /revise-self-deadline                            revise (POST)
/// /revise-self-deadline/{task_id}                  history (GET)
///
/// /revise-master-deadline/request                  request revision (POST)
/// /revise-master-deadline/review                   review request (POST)
/// /revise-master-deadline/requests/pending         reviewer inbox (GET)
/// /revise-master-deadline/requests/mine            requester view (GET)
/// /revise-master-deadline/{task_id}                history (GET)
/// ```
///
/// Every route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/revise-self-deadline", revise_self_deadline::router())
        .nest("/revise-master-deadline", revise_master_deadline::router())
}
