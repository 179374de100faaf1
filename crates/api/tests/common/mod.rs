#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use peerline_api::auth::jwt::JwtConfig;
use peerline_api::config::ServerConfig;
use peerline_api::router::build_app_router;
use peerline_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a request and return the raw response.
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A registered user's credentials for driving the API in tests.
pub struct TestUser {
    /// Numeric user id as reported by the auth endpoints.
    pub id: i64,
    pub username: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Register a user through the API and return their tokens.
pub async fn register_user(app: &Router, username: &str) -> TestUser {
    let body = serde_json::json!({ "username": username, "password": "test_password_123!" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED, "registration must succeed");

    let json = body_json(response).await;
    TestUser {
        id: json["user"]["id"].as_i64().unwrap(),
        username: username.to_string(),
        access_token: json["access_token"].as_str().unwrap().to_string(),
        refresh_token: json["refresh_token"].as_str().unwrap().to_string(),
    }
}

/// Create a conversation as the given user and return its id (string form).
pub async fn create_conversation(app: &Router, user: &TestUser, title: &str) -> String {
    let body = serde_json::json!({ "title": title });
    let response = post_json_auth(app, "/api/v1/conversations", &user.access_token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED, "creation must succeed");

    let json = body_json(response).await;
    json["id"].as_str().unwrap().to_string()
}

/// Claim a conversation as the given user, asserting success.
pub async fn claim_conversation(app: &Router, user: &TestUser, conversation_id: &str) {
    let uri = format!("/api/v1/expert/conversations/{conversation_id}/claim");
    let response = post_auth(app, &uri, &user.access_token).await;
    assert_eq!(response.status(), StatusCode::OK, "claim must succeed");
}

/// Send a message as the given user and return the message view.
pub async fn send_message(
    app: &Router,
    user: &TestUser,
    conversation_id: &str,
    content: &str,
) -> serde_json::Value {
    let body = serde_json::json!({ "conversationId": conversation_id, "content": content });
    let response = post_json_auth(app, "/api/v1/messages", &user.access_token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED, "send must succeed");
    body_json(response).await
}

/// Fetch the caller's expert profile id (string form).
pub async fn expert_profile_id(app: &Router, user: &TestUser) -> String {
    let response = get_auth(app, "/api/v1/expert/profile", &user.access_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["id"].as_str().unwrap().to_string()
}
