//! Authentication tests: every deadline route needs a valid Bearer token
//! carrying a known role.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, test_jwt_config};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use sqlx::PgPool;
use taskdesk_api::auth::jwt::{generate_access_token, Claims, JwtConfig};
use taskdesk_core::roles::Role;
use uuid::Uuid;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/revise-master-deadline/requests/mine").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");

    let app = common::build_test_app(pool);
    let body = json!({ "task_id": 1, "new_deadline": "2024-01-15", "reason": "x" });
    let response = post_json(app, "/api/v1/revise-self-deadline", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_bearer_scheme_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = axum::http::Request::builder()
        .uri("/api/v1/revise-master-deadline/requests/mine")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_signed_with_other_secret_returns_401(pool: PgPool) {
    let foreign = JwtConfig {
        secret: "some-other-secret".to_string(),
        access_token_expiry_mins: 15,
    };
    let token = generate_access_token(Uuid::new_v4(), Role::Member, &foreign).unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/revise-master-deadline/requests/mine", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_role_returns_401(pool: PgPool) {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: Uuid::new_v4(),
        role: "superuser".to_string(),
        exp: now + 600,
        iat: now,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(test_jwt_config().secret.as_bytes()),
    )
    .unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/revise-master-deadline/requests/mine", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("superuser"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_valid_token_is_accepted(pool: PgPool) {
    let token = common::token_for(Uuid::new_v4(), Role::SubAdmin);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/revise-master-deadline/requests/mine", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], json!([]));
}
