//! Message entity model and read projections.

use peerline_core::access::ConversationFacts;
use peerline_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Bare row from the `messages` table. Append-only: no update beyond the
/// `is_read` flag, no delete.
#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: DbId,
    pub conversation_id: DbId,
    pub sender_id: DbId,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// Message joined with its sender's username and the owning conversation's
/// current participant state, so the display role and per-message access can
/// be derived without a second fetch.
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithContext {
    pub id: DbId,
    pub conversation_id: DbId,
    pub sender_id: DbId,
    pub sender_username: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub conversation_initiator_id: DbId,
    pub conversation_assigned_expert_id: Option<DbId>,
    pub conversation_status: String,
}

impl MessageWithContext {
    /// Access facts of the owning conversation as of this fetch.
    pub fn conversation_facts(&self) -> ConversationFacts {
        ConversationFacts {
            initiator_id: self.conversation_initiator_id,
            assigned_expert_id: self.conversation_assigned_expert_id,
            status: self.conversation_status.clone(),
        }
    }

    /// Display role of the sender relative to the conversation's *current*
    /// participants. A message from a since-unassigned expert has no role.
    pub fn sender_role(&self) -> Option<&'static str> {
        if self.sender_id == self.conversation_initiator_id {
            Some("initiator")
        } else if Some(self.sender_id) == self.conversation_assigned_expert_id {
            Some("expert")
        } else {
            None
        }
    }
}
