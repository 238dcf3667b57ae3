#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use taskdesk_api::auth::jwt::{generate_access_token, JwtConfig};
use taskdesk_api::config::ServerConfig;
use taskdesk_api::router::build_app_router;
use taskdesk_api::state::AppState;
use taskdesk_core::roles::Role;
use taskdesk_core::types::{DbId, UserId};
use taskdesk_db::models::task::{CreateAssignedTask, CreateSelfTask};
use taskdesk_db::repositories::TaskRepo;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Build a test `ServerConfig` with the development CORS origin and a
/// 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        jwt: test_jwt_config(),
    }
}

/// Build the production router (same middleware stack) over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint an access token for `user` signed with the test secret.
pub fn token_for(user: UserId, role: Role) -> String {
    generate_access_token(user, role, &test_jwt_config()).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Insert a self task owned by `owner`, returning its id.
pub async fn seed_self_task(pool: &PgPool, owner: UserId, timeline: Option<&str>) -> DbId {
    TaskRepo::create_self_task(
        pool,
        &CreateSelfTask {
            user_id: owner,
            task_name: "Quarterly report".to_string(),
            timeline: timeline.map(date),
        },
    )
    .await
    .expect("self task insert should succeed")
    .id
}

/// Participants of an assigned task.
pub struct AssignedFixture {
    pub task_id: DbId,
    pub assigner: UserId,
    pub assignee: UserId,
}

/// Insert an assigned task between two fresh users.
pub async fn seed_assigned_task(pool: &PgPool, timeline: Option<&str>) -> AssignedFixture {
    let assigner = Uuid::new_v4();
    let assignee = Uuid::new_v4();
    let task = TaskRepo::create_assigned_task(
        pool,
        &CreateAssignedTask {
            assigned_by: assigner,
            assigned_to: assignee,
            task_name: "Vendor onboarding".to_string(),
            timeline: timeline.map(date),
        },
    )
    .await
    .expect("assigned task insert should succeed");
    AssignedFixture {
        task_id: task.id,
        assigner,
        assignee,
    }
}

/// Make every `event` (`INSERT`, `UPDATE`) on `table` raise an error.
pub async fn fail_writes(pool: &PgPool, table: &str, event: &str) {
    install_row_trigger(pool, table, event, "RAISE EXCEPTION 'write blocked';").await;
}

/// Make every `event` on `table` a silent no-op that affects zero rows.
pub async fn skip_writes(pool: &PgPool, table: &str, event: &str) {
    install_row_trigger(pool, table, event, "RETURN NULL;").await;
}

async fn install_row_trigger(pool: &PgPool, table: &str, event: &str, body: &str) {
    let name = format!("zz_block_{table}_{}", event.to_lowercase());
    sqlx::query(&format!(
        "CREATE FUNCTION {name}() RETURNS TRIGGER AS $$ BEGIN {body} END; $$ LANGUAGE plpgsql"
    ))
    .execute(pool)
    .await
    .expect("trigger function should be created");
    sqlx::query(&format!(
        "CREATE TRIGGER {name} BEFORE {event} ON {table} FOR EACH ROW EXECUTE FUNCTION {name}()"
    ))
    .execute(pool)
    .await
    .expect("trigger should be created");
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a raw (possibly malformed) body with a JSON content type.
pub async fn post_raw_auth(app: Router, uri: &str, body: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
