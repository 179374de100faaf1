pub mod auth;
pub mod conversations;
pub mod expert;
pub mod health;
pub mod messages;
pub mod updates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current user (requires auth)
///
/// /conversations                                   list, create
/// /conversations/{id}                              get
/// /conversations/{conversation_id}/messages        list messages
///
/// /messages                                        send (POST)
/// /messages/{id}/read                              mark read (PUT)
///
/// /expert/queue                                    waiting + assigned snapshot
/// /expert/profile                                  get, update
/// /expert/assignments/history                      claim history
/// /expert/conversations/{conversation_id}/claim    claim (POST)
/// /expert/conversations/{conversation_id}/unclaim  unclaim (POST)
///
/// /updates/conversations                           poll conversations
/// /updates/messages                                poll messages
/// /updates/expert-queue                            poll expert queue
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/conversations", conversations::router())
        .nest("/messages", messages::router())
        .nest("/expert", expert::router())
        .nest("/updates", updates::router())
}
