//! Route definitions for the `/conversations` resource.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::{conversations, messages};
use crate::state::AppState;

/// Routes mounted at `/conversations`.
///
/// ```text
/// GET  /                                 -> index
/// POST /                                 -> create
/// GET  /{id}                             -> show
/// GET  /{conversation_id}/messages       -> message listing
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(conversations::index).post(conversations::create),
        )
        .route("/{id}", get(conversations::show))
        .route("/{conversation_id}/messages", get(messages::index))
}
