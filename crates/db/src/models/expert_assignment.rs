//! Expert assignment audit records.

use peerline_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Row from the `expert_assignments` table. One record per claim episode;
/// unclaiming resolves the record instead of deleting it.
#[derive(Debug, Clone, FromRow)]
pub struct ExpertAssignment {
    pub id: DbId,
    pub conversation_id: DbId,
    pub expert_id: DbId,
    pub status: String,
    pub assigned_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub rating: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
