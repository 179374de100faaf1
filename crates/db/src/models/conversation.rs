//! Conversation entity model and read projections.

use peerline_core::access::ConversationFacts;
use peerline_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Bare row from the `conversations` table.
#[derive(Debug, Clone, FromRow)]
pub struct Conversation {
    pub id: DbId,
    pub title: String,
    pub status: String,
    pub initiator_id: DbId,
    pub assigned_expert_id: Option<DbId>,
    pub last_message_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Conversation {
    /// The subset of fields access decisions depend on.
    pub fn facts(&self) -> ConversationFacts {
        ConversationFacts {
            initiator_id: self.initiator_id,
            assigned_expert_id: self.assigned_expert_id,
            status: self.status.clone(),
        }
    }
}

/// Conversation joined with participant usernames and the viewer-relative
/// unread count. One row per conversation, computed in a single query to
/// keep list endpoints free of per-row lookups.
#[derive(Debug, Clone, FromRow)]
pub struct ConversationSummary {
    pub id: DbId,
    pub title: String,
    pub status: String,
    pub initiator_id: DbId,
    pub initiator_username: String,
    pub assigned_expert_id: Option<DbId>,
    pub assigned_expert_username: Option<String>,
    pub last_message_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Unread messages not sent by the viewer the summary was built for.
    pub unread_count: i64,
}
