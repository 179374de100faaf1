//! Handlers for the `/expert` resource: queue, claim/unclaim, profile, history.

use axum::extract::{Path, State};
use axum::Json;
use peerline_core::error::CoreError;
use peerline_db::models::expert_profile::{ExpertProfile, UpdateExpertProfile};
use peerline_db::repositories::conversation_repo::ClaimOutcome;
use peerline_db::repositories::{AssignmentRepo, ConversationRepo, ExpertProfileRepo};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_id;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::views::{AssignmentView, ExpertProfileView, ExpertQueueView};

/// Request body for `PUT /expert/profile`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub bio: Option<String>,
    pub knowledge_base_links: Option<Vec<String>>,
}

/// Resolve the caller's expert profile.
///
/// Every user gets a profile at registration, so a miss indicates a damaged
/// account rather than a normal state; it surfaces as 403.
async fn require_profile(state: &AppState, auth: &AuthUser) -> AppResult<ExpertProfile> {
    ExpertProfileRepo::find_by_user_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Forbidden("Expert profile required".into())))
}

/// GET /api/v1/expert/queue
///
/// Snapshot of the shared waiting queue (oldest first) and the caller's
/// assigned conversations (most recently updated first).
pub async fn queue(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ExpertQueueView>> {
    require_profile(&state, &auth).await?;

    let waiting = ConversationRepo::waiting_summaries(&state.pool, auth.user_id, None).await?;
    let assigned = ConversationRepo::assigned_summaries(&state.pool, auth.user_id, None).await?;

    Ok(Json(ExpertQueueView {
        waiting_conversations: waiting.into_iter().map(Into::into).collect(),
        assigned_conversations: assigned.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/v1/expert/conversations/{conversation_id}/claim
///
/// Atomically claim a waiting conversation. Exactly one of N concurrent
/// claims wins; the rest observe the already-assigned conflict.
pub async fn claim(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let profile = require_profile(&state, &auth).await?;
    let conversation_id = parse_id(&conversation_id, "Conversation")?;

    ConversationRepo::find_by_id(&state.pool, conversation_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Conversation",
        }))?;

    match ConversationRepo::claim(&state.pool, conversation_id, auth.user_id, profile.id).await? {
        ClaimOutcome::Claimed => Ok(Json(json!({ "success": true }))),
        ClaimOutcome::AlreadyAssigned => Err(AppError::Core(CoreError::Conflict(
            "Conversation is already assigned to an expert".into(),
        ))),
    }
}

/// POST /api/v1/expert/conversations/{conversation_id}/unclaim
///
/// Return a conversation the caller holds to the waiting queue and resolve
/// the matching assignment record.
pub async fn unclaim(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let profile = require_profile(&state, &auth).await?;
    let conversation_id = parse_id(&conversation_id, "Conversation")?;

    let conversation = ConversationRepo::find_by_id(&state.pool, conversation_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Conversation",
        }))?;

    if conversation.assigned_expert_id != Some(auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not assigned to this conversation".into(),
        )));
    }

    ConversationRepo::unclaim(&state.pool, conversation_id, profile.id).await?;

    Ok(Json(json!({ "success": true })))
}

/// GET /api/v1/expert/profile
pub async fn profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ExpertProfileView>> {
    let profile = require_profile(&state, &auth).await?;
    Ok(Json(profile.into()))
}

/// PUT /api/v1/expert/profile
///
/// Replace the caller's bio and knowledge-base links.
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<ExpertProfileView>> {
    let update = UpdateExpertProfile {
        bio: input.bio.unwrap_or_default(),
        knowledge_base_links: input.knowledge_base_links.unwrap_or_default(),
    };

    let profile = ExpertProfileRepo::update_for_user(&state.pool, auth.user_id, &update)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Forbidden("Expert profile required".into())))?;

    Ok(Json(profile.into()))
}

/// GET /api/v1/expert/assignments/history
///
/// The caller's claim episodes, newest first.
pub async fn assignments_history(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AssignmentView>>> {
    let profile = require_profile(&state, &auth).await?;

    let assignments = AssignmentRepo::list_for_expert(&state.pool, profile.id).await?;
    Ok(Json(assignments.into_iter().map(Into::into).collect()))
}
