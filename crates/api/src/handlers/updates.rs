//! Handlers for the `/updates` polling feed.
//!
//! Clients poll with an optional `since` cursor instead of holding a
//! connection. All three feeds are self-scoped: the id parameter must belong
//! to the caller, compared as text since ids are exchanged as strings.

use axum::extract::{Query, State};
use axum::Json;
use peerline_core::access::can_access;
use peerline_core::error::CoreError;
use peerline_db::repositories::{ConversationRepo, ExpertProfileRepo, MessageRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_since;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::views::{ConversationView, ExpertQueueView, MessageView};

/// Query parameters for the user-scoped feeds.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFeedParams {
    pub user_id: Option<String>,
    pub since: Option<String>,
}

/// Query parameters for the expert-queue feed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertFeedParams {
    pub expert_id: Option<String>,
    pub since: Option<String>,
}

/// Validate the self-lookup contract: the id parameter must be present and
/// textually equal to the caller's own id.
fn require_self(param: Option<&str>, own_id: &str, name: &str) -> Result<(), AppError> {
    let param = param
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{name} parameter is required")))?;
    if param != own_id {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Unauthorized".into(),
        )));
    }
    Ok(())
}

/// GET /api/v1/updates/conversations?userId=&since=
///
/// Visible conversations updated strictly after the cursor, newest first.
pub async fn conversations(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UserFeedParams>,
) -> AppResult<Json<Vec<ConversationView>>> {
    require_self(
        params.user_id.as_deref(),
        &auth.user_id.to_string(),
        "userId",
    )?;
    let since = parse_since(params.since.as_deref())?;

    let summaries = ConversationRepo::updates_for_user(&state.pool, auth.user_id, since).await?;
    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/updates/messages?userId=&since=
///
/// Messages from the caller's visible conversations created strictly after
/// the cursor, oldest first. Visibility is re-checked per message after the
/// coarse id-set filter: a conversation claimed by someone else between the
/// two steps drops out instead of leaking.
pub async fn messages(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UserFeedParams>,
) -> AppResult<Json<Vec<MessageView>>> {
    require_self(
        params.user_id.as_deref(),
        &auth.user_id.to_string(),
        "userId",
    )?;
    let since = parse_since(params.since.as_deref())?;

    let visible_ids = ConversationRepo::visible_ids_for_user(&state.pool, auth.user_id).await?;
    if visible_ids.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let messages =
        MessageRepo::updates_for_conversations(&state.pool, &visible_ids, since).await?;

    let views = messages
        .into_iter()
        .filter(|m| can_access(auth.user_id, &m.conversation_facts()))
        .map(Into::into)
        .collect();

    Ok(Json(views))
}

/// GET /api/v1/updates/expert-queue?expertId=&since=
///
/// The waiting queue and the caller's assigned set, each cursor-filtered,
/// combined into a single-element array payload.
pub async fn expert_queue(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ExpertFeedParams>,
) -> AppResult<Json<Vec<ExpertQueueView>>> {
    if params.expert_id.as_deref().filter(|p| !p.is_empty()).is_none() {
        return Err(AppError::BadRequest("expertId parameter is required".into()));
    }

    let profile = ExpertProfileRepo::find_by_user_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Forbidden("Expert profile required".into())))?;

    require_self(
        params.expert_id.as_deref(),
        &profile.id.to_string(),
        "expertId",
    )?;
    let since = parse_since(params.since.as_deref())?;

    let waiting = ConversationRepo::waiting_summaries(&state.pool, auth.user_id, since).await?;
    let assigned = ConversationRepo::assigned_summaries(&state.pool, auth.user_id, since).await?;

    Ok(Json(vec![ExpertQueueView {
        waiting_conversations: waiting.into_iter().map(Into::into).collect(),
        assigned_conversations: assigned.into_iter().map(Into::into).collect(),
    }]))
}
