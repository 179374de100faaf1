//! Conversation access rules.
//!
//! Two distinct predicates are derived from the same facts and must stay
//! separate: a prospective expert may *read* a waiting conversation before
//! claiming it, but may not *write* to it. Role is always computed from the
//! current assignment state, never stored.

use crate::status::CONVERSATION_WAITING;
use crate::types::DbId;

/// The facts about a conversation that access decisions depend on.
#[derive(Debug, Clone)]
pub struct ConversationFacts {
    pub initiator_id: DbId,
    pub assigned_expert_id: Option<DbId>,
    pub status: String,
}

impl ConversationFacts {
    /// True while the conversation sits unclaimed in the waiting queue.
    pub fn is_waiting_unassigned(&self) -> bool {
        self.status == CONVERSATION_WAITING && self.assigned_expert_id.is_none()
    }
}

/// Read predicate: initiator, currently assigned expert, or anyone while the
/// conversation is waiting and unassigned (preview before claiming).
pub fn can_access(user_id: DbId, conversation: &ConversationFacts) -> bool {
    conversation.initiator_id == user_id
        || conversation.assigned_expert_id == Some(user_id)
        || conversation.is_waiting_unassigned()
}

/// Write predicate: only the initiator or the currently assigned expert may
/// send messages. A previewing expert must claim first.
pub fn can_message(user_id: DbId, conversation: &ConversationFacts) -> bool {
    conversation.initiator_id == user_id || conversation.assigned_expert_id == Some(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{CONVERSATION_ACTIVE, CONVERSATION_WAITING};

    fn waiting(initiator_id: DbId) -> ConversationFacts {
        ConversationFacts {
            initiator_id,
            assigned_expert_id: None,
            status: CONVERSATION_WAITING.to_string(),
        }
    }

    fn active(initiator_id: DbId, expert_id: DbId) -> ConversationFacts {
        ConversationFacts {
            initiator_id,
            assigned_expert_id: Some(expert_id),
            status: CONVERSATION_ACTIVE.to_string(),
        }
    }

    #[test]
    fn initiator_can_read_and_write() {
        let conv = active(1, 2);
        assert!(can_access(1, &conv));
        assert!(can_message(1, &conv));
    }

    #[test]
    fn assigned_expert_can_read_and_write() {
        let conv = active(1, 2);
        assert!(can_access(2, &conv));
        assert!(can_message(2, &conv));
    }

    #[test]
    fn anyone_can_preview_waiting_conversation() {
        let conv = waiting(1);
        assert!(can_access(3, &conv));
    }

    #[test]
    fn previewer_cannot_message_waiting_conversation() {
        // Readable but not writable: the read/write asymmetry before claiming.
        let conv = waiting(1);
        assert!(can_access(3, &conv));
        assert!(!can_message(3, &conv));
    }

    #[test]
    fn third_party_cannot_touch_active_conversation() {
        let conv = active(1, 2);
        assert!(!can_access(3, &conv));
        assert!(!can_message(3, &conv));
    }

    #[test]
    fn waiting_with_leftover_assignment_is_not_open() {
        // Inconsistent state: status says waiting but an expert is recorded.
        // The queue-preview rule must not apply.
        let conv = ConversationFacts {
            initiator_id: 1,
            assigned_expert_id: Some(2),
            status: CONVERSATION_WAITING.to_string(),
        };
        assert!(!conv.is_waiting_unassigned());
        assert!(!can_access(3, &conv));
    }
}
