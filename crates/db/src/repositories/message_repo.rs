//! Repository for the `messages` table.

use peerline_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::message::{Message, MessageWithContext};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, conversation_id, sender_id, content, is_read, created_at";

/// Select joining sender username and the owning conversation's current
/// participant state. `created_at, id` ordering keeps same-timestamp
/// messages in insertion order.
fn context_query(where_clause: &str) -> String {
    format!(
        "SELECT m.id, m.conversation_id, m.sender_id,
                su.username AS sender_username,
                m.content, m.is_read, m.created_at,
                c.initiator_id AS conversation_initiator_id,
                c.assigned_expert_id AS conversation_assigned_expert_id,
                c.status AS conversation_status
         FROM messages m
         JOIN users su ON su.id = m.sender_id
         JOIN conversations c ON c.id = m.conversation_id
         WHERE {where_clause}
         ORDER BY m.created_at ASC, m.id ASC"
    )
}

/// Provides append and read operations for the per-conversation message log.
pub struct MessageRepo;

impl MessageRepo {
    /// Append a message and advance the conversation's `last_message_at` to
    /// the new message's timestamp, in one transaction.
    pub async fn append(
        pool: &PgPool,
        conversation_id: DbId,
        sender_id: DbId,
        content: &str,
    ) -> Result<Message, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO messages (conversation_id, sender_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let message = sqlx::query_as::<_, Message>(&query)
            .bind(conversation_id)
            .bind(sender_id)
            .bind(content)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE conversations SET last_message_at = $2 WHERE id = $1")
            .bind(conversation_id)
            .bind(message.created_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(message)
    }

    /// Find a message by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a message by ID with sender and conversation context.
    pub async fn find_context_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MessageWithContext>, sqlx::Error> {
        let query = context_query("m.id = $1");
        sqlx::query_as::<_, MessageWithContext>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All messages of a conversation in creation order, with display context.
    pub async fn list_for_conversation(
        pool: &PgPool,
        conversation_id: DbId,
    ) -> Result<Vec<MessageWithContext>, sqlx::Error> {
        let query = context_query("m.conversation_id = $1");
        sqlx::query_as::<_, MessageWithContext>(&query)
            .bind(conversation_id)
            .fetch_all(pool)
            .await
    }

    /// Messages belonging to any of the given conversations, created strictly
    /// after `since`, in creation order. The coarse filter for polling;
    /// callers re-check per-message visibility afterwards.
    pub async fn updates_for_conversations(
        pool: &PgPool,
        conversation_ids: &[DbId],
        since: Option<Timestamp>,
    ) -> Result<Vec<MessageWithContext>, sqlx::Error> {
        match since {
            Some(since) => {
                let query = context_query("m.conversation_id = ANY($1) AND m.created_at > $2");
                sqlx::query_as::<_, MessageWithContext>(&query)
                    .bind(conversation_ids)
                    .bind(since)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = context_query("m.conversation_id = ANY($1)");
                sqlx::query_as::<_, MessageWithContext>(&query)
                    .bind(conversation_ids)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Set `is_read = true`. Idempotent: re-marking an already-read message
    /// still reports the row as found. Returns `false` only if no such
    /// message exists.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE messages SET is_read = true WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
