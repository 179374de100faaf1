//! Route definitions for the `/updates` polling feed.
//!
//! All endpoints require authentication and are self-scoped.

use axum::routing::get;
use axum::Router;

use crate::handlers::updates;
use crate::state::AppState;

/// Routes mounted at `/updates`.
///
/// ```text
/// GET /conversations?userId=&since=   -> conversation deltas
/// GET /messages?userId=&since=        -> message deltas
/// GET /expert-queue?expertId=&since=  -> queue + assigned deltas
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/conversations", get(updates::conversations))
        .route("/messages", get(updates::messages))
        .route("/expert-queue", get(updates::expert_queue))
}
