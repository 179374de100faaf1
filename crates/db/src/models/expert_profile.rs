//! Expert profile model and DTOs.
//!
//! Every user owns exactly one profile, created in the same transaction as
//! the user row. There is no separate "become an expert" step.

use peerline_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// Row from the `expert_profiles` table.
#[derive(Debug, Clone, FromRow)]
pub struct ExpertProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub bio: String,
    /// Ordered list of knowledge-base links, stored as JSONB.
    pub knowledge_base_links: Json<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating a profile. Both fields are replaced wholesale.
#[derive(Debug, Deserialize)]
pub struct UpdateExpertProfile {
    pub bio: String,
    pub knowledge_base_links: Vec<String>,
}
