//! Full lifecycle walkthrough: create, claim race, message, read, unclaim.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{body_json, build_test_app, get_auth, post_auth, put_auth, register_user};

#[sqlx::test(migrations = "../../db/migrations")]
async fn conversation_lifecycle_end_to_end(pool: PgPool) {
    let app = build_test_app(pool);
    let asker = register_user(&app, "asker").await;
    let helper = register_user(&app, "helper").await;
    let latecomer = register_user(&app, "latecomer").await;

    // Asker opens a conversation; it enters the queue waiting and unassigned.
    let response = common::post_json_auth(
        &app,
        "/api/v1/conversations",
        &asker.access_token,
        json!({ "title": "Need help" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let conversation = body_json(response).await;
    assert_eq!(conversation["status"], "waiting");
    assert!(conversation["assignedExpertId"].is_null());
    let conversation_id = conversation["id"].as_str().unwrap().to_string();

    // Helper holds no assignment yet, so their listing does not include it.
    let listing =
        body_json(get_auth(&app, "/api/v1/conversations", &helper.access_token).await).await;
    assert!(listing.as_array().unwrap().is_empty());

    // Helper claims it; the conversation activates.
    let claim_uri = format!("/api/v1/expert/conversations/{conversation_id}/claim");
    let response = post_auth(&app, &claim_uri, &helper.access_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let view_uri = format!("/api/v1/conversations/{conversation_id}");
    let view = body_json(get_auth(&app, &view_uri, &helper.access_token).await).await;
    assert_eq!(view["status"], "active");
    assert_eq!(view["assignedExpertId"], helper.id.to_string());

    // A later claim on the same conversation loses.
    let response = post_auth(&app, &claim_uri, &latecomer.access_token).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    // Asker sends a message; last_message_at moves.
    let response = common::post_json_auth(
        &app,
        "/api/v1/messages",
        &asker.access_token,
        json!({ "conversationId": conversation_id, "content": "Here is my problem" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let message = body_json(response).await;
    assert_eq!(message["isRead"], false);
    let message_id = message["id"].as_str().unwrap().to_string();

    let view = body_json(get_auth(&app, &view_uri, &helper.access_token).await).await;
    assert!(!view["lastMessageAt"].is_null());

    // Helper reads the message list and marks the message read, twice.
    let messages_uri = format!("/api/v1/conversations/{conversation_id}/messages");
    let messages = body_json(get_auth(&app, &messages_uri, &helper.access_token).await).await;
    assert_eq!(messages.as_array().unwrap().len(), 1);
    assert_eq!(messages[0]["content"], "Here is my problem");
    assert_eq!(messages[0]["isRead"], false);

    let read_uri = format!("/api/v1/messages/{message_id}/read");
    assert_eq!(
        put_auth(&app, &read_uri, &helper.access_token).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        put_auth(&app, &read_uri, &helper.access_token).await.status(),
        StatusCode::OK
    );

    let messages = body_json(get_auth(&app, &messages_uri, &helper.access_token).await).await;
    assert_eq!(messages[0]["isRead"], true);

    // Helper unclaims; the conversation returns to the queue unassigned.
    let unclaim_uri = format!("/api/v1/expert/conversations/{conversation_id}/unclaim");
    let response = post_auth(&app, &unclaim_uri, &helper.access_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let view = body_json(get_auth(&app, &view_uri, &asker.access_token).await).await;
    assert_eq!(view["status"], "waiting");
    assert!(view["assignedExpertId"].is_null());

    // The claim episode is closed out in the helper's history.
    let history = body_json(
        get_auth(
            &app,
            "/api/v1/expert/assignments/history",
            &helper.access_token,
        )
        .await,
    )
    .await;
    assert_eq!(history[0]["status"], "resolved");
}
