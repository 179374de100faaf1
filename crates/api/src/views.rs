//! External-facing view DTOs.
//!
//! The client contract uses camelCase field names, ids as strings, and
//! RFC 3339 timestamps. Views are built from the joined read projections in
//! `peerline_db::models` so list endpoints stay single-query.

use peerline_core::types::Timestamp;
use peerline_db::models::conversation::ConversationSummary;
use peerline_db::models::expert_assignment::ExpertAssignment;
use peerline_db::models::expert_profile::ExpertProfile;
use peerline_db::models::message::MessageWithContext;
use serde::Serialize;

/// Conversation as seen by a specific viewer (unread count is viewer-relative).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationView {
    pub id: String,
    pub title: String,
    pub status: String,
    pub questioner_id: String,
    pub questioner_username: String,
    pub assigned_expert_id: Option<String>,
    pub assigned_expert_username: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub last_message_at: Option<Timestamp>,
    pub unread_count: i64,
}

impl From<ConversationSummary> for ConversationView {
    fn from(s: ConversationSummary) -> Self {
        Self {
            id: s.id.to_string(),
            title: s.title,
            status: s.status,
            questioner_id: s.initiator_id.to_string(),
            questioner_username: s.initiator_username,
            assigned_expert_id: s.assigned_expert_id.map(|id| id.to_string()),
            assigned_expert_username: s.assigned_expert_username,
            created_at: s.created_at,
            updated_at: s.updated_at,
            last_message_at: s.last_message_at,
            unread_count: s.unread_count,
        }
    }
}

/// Message with its sender's display role relative to the conversation's
/// current participants.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub sender_username: String,
    /// `"initiator"`, `"expert"`, or absent for a sender who is neither
    /// (e.g. a since-unassigned prior expert).
    pub sender_role: Option<&'static str>,
    pub content: String,
    pub timestamp: Timestamp,
    pub is_read: bool,
}

impl From<MessageWithContext> for MessageView {
    fn from(m: MessageWithContext) -> Self {
        let sender_role = m.sender_role();
        Self {
            id: m.id.to_string(),
            conversation_id: m.conversation_id.to_string(),
            sender_id: m.sender_id.to_string(),
            sender_username: m.sender_username,
            sender_role,
            content: m.content,
            timestamp: m.created_at,
            is_read: m.is_read,
        }
    }
}

/// Expert profile view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertProfileView {
    pub id: String,
    pub user_id: String,
    pub bio: String,
    pub knowledge_base_links: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ExpertProfile> for ExpertProfileView {
    fn from(p: ExpertProfile) -> Self {
        Self {
            id: p.id.to_string(),
            user_id: p.user_id.to_string(),
            bio: p.bio,
            knowledge_base_links: p.knowledge_base_links.0,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// One claim episode from the assignment history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentView {
    pub id: String,
    pub conversation_id: String,
    pub expert_id: String,
    pub status: String,
    pub assigned_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub rating: Option<i32>,
}

impl From<ExpertAssignment> for AssignmentView {
    fn from(a: ExpertAssignment) -> Self {
        Self {
            id: a.id.to_string(),
            conversation_id: a.conversation_id.to_string(),
            expert_id: a.expert_id.to_string(),
            status: a.status,
            assigned_at: a.assigned_at,
            resolved_at: a.resolved_at,
            rating: a.rating,
        }
    }
}

/// The expert queue: the shared waiting pool plus this expert's assigned set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertQueueView {
    pub waiting_conversations: Vec<ConversationView>,
    pub assigned_conversations: Vec<ConversationView>,
}
