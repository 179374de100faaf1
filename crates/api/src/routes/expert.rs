//! Route definitions for the `/expert` resource.
//!
//! All endpoints require authentication; every user carries an expert
//! profile, so "expert" here is a capability, not a role.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::expert;
use crate::state::AppState;

/// Routes mounted at `/expert`.
///
/// ```text
/// GET  /queue                                    -> waiting + assigned snapshot
/// GET  /profile                                  -> profile view
/// PUT  /profile                                  -> update profile
/// GET  /assignments/history                      -> claim history
/// POST /conversations/{conversation_id}/claim    -> claim
/// POST /conversations/{conversation_id}/unclaim  -> unclaim
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/queue", get(expert::queue))
        .route(
            "/profile",
            get(expert::profile).put(expert::update_profile),
        )
        .route("/assignments/history", get(expert::assignments_history))
        .route(
            "/conversations/{conversation_id}/claim",
            post(expert::claim),
        )
        .route(
            "/conversations/{conversation_id}/unclaim",
            post(expert::unclaim),
        )
}
