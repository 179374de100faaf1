//! Handlers for the `/conversations` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use peerline_core::access::can_access;
use peerline_core::error::CoreError;
use peerline_db::repositories::ConversationRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_id;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::views::ConversationView;

/// Request body for `POST /conversations`.
#[derive(Debug, Deserialize)]
pub struct CreateConversationRequest {
    pub title: Option<String>,
}

/// POST /api/v1/conversations
///
/// Open a new help request; it enters the waiting queue unassigned.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateConversationRequest>,
) -> AppResult<(StatusCode, Json<ConversationView>)> {
    let title = input.title.as_deref().unwrap_or("").trim().to_string();
    if title.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title can't be blank".into(),
        )));
    }

    let conversation = ConversationRepo::create(&state.pool, auth.user_id, &title).await?;

    let summary = ConversationRepo::summary_by_id(&state.pool, conversation.id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::InternalError("Created conversation vanished".into()))?;

    Ok((StatusCode::CREATED, Json(summary.into())))
}

/// GET /api/v1/conversations
///
/// List the caller's visible conversations. A caller currently holding at
/// least one assignment also sees the waiting queue.
pub async fn index(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ConversationView>>> {
    let summaries = ConversationRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/conversations/{id}
///
/// Fetch one conversation. Access denial is masked as 404 so callers cannot
/// probe for conversations they may not see.
pub async fn show(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ConversationView>> {
    let id = parse_id(&id, "Conversation")?;

    let summary = ConversationRepo::summary_by_id(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Conversation",
        }))?;

    let facts = peerline_core::access::ConversationFacts {
        initiator_id: summary.initiator_id,
        assigned_expert_id: summary.assigned_expert_id,
        status: summary.status.clone(),
    };
    if !can_access(auth.user_id, &facts) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Conversation",
        }));
    }

    Ok(Json(summary.into()))
}
