//! Route definitions for the `/messages` resource.
//!
//! All endpoints require authentication.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

/// Routes mounted at `/messages`.
///
/// ```text
/// POST /           -> send message
/// PUT  /{id}/read  -> mark read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(messages::create))
        .route("/{id}/read", put(messages::mark_read))
}
