mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{body_json, build_test_app, get_auth, post_auth, post_json, register_user};

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_tokens_and_user(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({ "username": "alice", "password": "a-long-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(json["refresh_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(json["user"]["username"], "alice");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({ "username": "alice", "password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_blank_username(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({ "username": "   ", "password": "a-long-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_duplicate_username(pool: PgPool) {
    let app = build_test_app(pool);
    register_user(&app, "alice").await;

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({ "username": "alice", "password": "another-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_succeeds_with_correct_credentials(pool: PgPool) {
    let app = build_test_app(pool);
    register_user(&app, "alice").await;

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        json!({ "username": "alice", "password": "test_password_123!" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].as_str().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_rejects_wrong_password(pool: PgPool) {
    let app = build_test_app(pool);
    register_user(&app, "alice").await;

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        json!({ "username": "alice", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_rejects_unknown_user(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        json!({ "username": "nobody", "password": "whatever-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_refresh_token(pool: PgPool) {
    let app = build_test_app(pool);
    let user = register_user(&app, "alice").await;

    let response = post_json(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": user.refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let new_refresh = json["refresh_token"].as_str().unwrap();
    assert_ne!(new_refresh, user.refresh_token);

    // The old token is single-use.
    let replay = post_json(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": user.refresh_token }),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_all_sessions(pool: PgPool) {
    let app = build_test_app(pool);
    let user = register_user(&app, "alice").await;

    let response = post_auth(&app, "/api/v1/auth/logout", &user.access_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let refresh = post_json(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": user.refresh_token }),
    )
    .await;
    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_returns_the_authenticated_user(pool: PgPool) {
    let app = build_test_app(pool);
    let user = register_user(&app, "alice").await;

    let response = get_auth(&app, "/api/v1/auth/me", &user.access_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"].as_i64(), Some(user.id));
    assert_eq!(json["username"], "alice");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_routes_reject_missing_and_garbage_tokens(pool: PgPool) {
    let app = build_test_app(pool);

    let response = common::get(&app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(&app, "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
