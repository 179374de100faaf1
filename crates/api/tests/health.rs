mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::{body_json, build_test_app, get};

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_reports_ok(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn responses_carry_a_request_id(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_is_404(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/api/v1/nonexistent").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
