//! Repository for the `expert_assignments` audit table.
//!
//! Assignment rows are written by the claim/unclaim transitions in
//! [`crate::repositories::ConversationRepo`]; this repository only reads them.

use peerline_core::types::DbId;
use sqlx::PgPool;

use crate::models::expert_assignment::ExpertAssignment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, conversation_id, expert_id, status, assigned_at, \
                        resolved_at, rating, created_at, updated_at";

/// Read access to the per-expert claim history.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// All assignment records for an expert profile, newest claim first.
    pub async fn list_for_expert(
        pool: &PgPool,
        expert_profile_id: DbId,
    ) -> Result<Vec<ExpertAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM expert_assignments
             WHERE expert_id = $1
             ORDER BY assigned_at DESC"
        );
        sqlx::query_as::<_, ExpertAssignment>(&query)
            .bind(expert_profile_id)
            .fetch_all(pool)
            .await
    }

}
