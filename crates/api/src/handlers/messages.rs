//! Handlers for the `/messages` resource and per-conversation listing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use peerline_core::access::{can_access, can_message};
use peerline_core::error::CoreError;
use peerline_db::repositories::{ConversationRepo, MessageRepo};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_id;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::views::MessageView;

/// Request body for `POST /messages`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub conversation_id: String,
    pub content: Option<String>,
}

/// GET /api/v1/conversations/{conversation_id}/messages
///
/// All messages of a conversation in creation order. Deliberately returns an
/// empty array (not an error) when the conversation is missing or the caller
/// cannot read it, so this listing path leaks nothing.
pub async fn index(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> AppResult<Json<Vec<MessageView>>> {
    let Ok(conversation_id) = conversation_id.parse::<peerline_core::types::DbId>() else {
        return Ok(Json(Vec::new()));
    };

    let Some(conversation) = ConversationRepo::find_by_id(&state.pool, conversation_id).await?
    else {
        return Ok(Json(Vec::new()));
    };

    if !can_access(auth.user_id, &conversation.facts()) {
        return Ok(Json(Vec::new()));
    }

    let messages = MessageRepo::list_for_conversation(&state.pool, conversation_id).await?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/messages
///
/// Append a message. Only the initiator or the currently assigned expert may
/// write; everyone else (including an expert previewing a waiting
/// conversation) gets the same 404 as for a nonexistent conversation.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<MessageView>)> {
    let conversation_id = parse_id(&input.conversation_id, "Conversation")?;

    let conversation = ConversationRepo::find_by_id(&state.pool, conversation_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Conversation",
        }))?;

    if !can_message(auth.user_id, &conversation.facts()) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Conversation",
        }));
    }

    let content = input.content.as_deref().unwrap_or("");
    if content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Content can't be blank".into(),
        )));
    }

    let message = MessageRepo::append(&state.pool, conversation_id, auth.user_id, content).await?;

    let view = MessageRepo::find_context_by_id(&state.pool, message.id)
        .await?
        .ok_or_else(|| AppError::InternalError("Created message vanished".into()))?;

    Ok((StatusCode::CREATED, Json(view.into())))
}

/// PUT /api/v1/messages/{id}/read
///
/// Mark a message read. Restricted to conversation participants; a sender
/// cannot mark their own message. Idempotent: re-marking still succeeds.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let id = parse_id(&id, "Message")?;

    let message = MessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Message" }))?;

    // The conversation must still exist and the caller must be a participant;
    // anything else masks as the same not-found signal.
    let conversation = ConversationRepo::find_by_id(&state.pool, message.conversation_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Message" }))?;

    if !can_message(auth.user_id, &conversation.facts()) {
        return Err(AppError::Core(CoreError::NotFound { entity: "Message" }));
    }

    if message.sender_id == auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot mark your own messages as read".into(),
        )));
    }

    MessageRepo::mark_read(&state.pool, id).await?;

    Ok(Json(json!({ "success": true })))
}
