//! Repository for the `conversations` table.
//!
//! Owns the conversation lifecycle: creation into the waiting queue, the
//! claim/unclaim transitions, and the visibility queries behind listing and
//! polling. Claim is the one operation that must be race-safe: the
//! check-unassigned-then-assign step is a single conditional UPDATE so two
//! simultaneous claims cannot both succeed.

use peerline_core::status::{
    ASSIGNMENT_ACTIVE, ASSIGNMENT_RESOLVED, CONVERSATION_ACTIVE, CONVERSATION_WAITING,
};
use peerline_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::conversation::{Conversation, ConversationSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, status, initiator_id, assigned_expert_id, \
                        last_message_at, created_at, updated_at";

/// Build a [`ConversationSummary`] select with the given filter and ordering.
///
/// `$1` is always the viewer's user id (it parameterizes the unread count);
/// filter placeholders start at `$2`.
fn summary_query(where_clause: &str, order_clause: &str) -> String {
    format!(
        "SELECT c.id, c.title, c.status, c.initiator_id,
                iu.username AS initiator_username,
                c.assigned_expert_id,
                eu.username AS assigned_expert_username,
                c.last_message_at, c.created_at, c.updated_at,
                (SELECT COUNT(*) FROM messages m
                  WHERE m.conversation_id = c.id
                    AND m.is_read = false
                    AND m.sender_id <> $1) AS unread_count
         FROM conversations c
         JOIN users iu ON iu.id = c.initiator_id
         LEFT JOIN users eu ON eu.id = c.assigned_expert_id
         WHERE {where_clause}
         ORDER BY {order_clause}"
    )
}

/// Filter matching the viewer's visible set while they act as an expert:
/// initiated, currently assigned, or anything in the waiting queue.
const EXPERT_VISIBILITY: &str = "(c.initiator_id = $1
       OR c.assigned_expert_id = $1
       OR (c.status = 'waiting' AND c.assigned_expert_id IS NULL))";

/// Filter matching only the viewer's own initiated conversations.
const INITIATOR_VISIBILITY: &str = "c.initiator_id = $1";

/// Outcome of a claim attempt on an existing conversation.
#[derive(Debug, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The caller won the conversation; an active assignment was recorded.
    Claimed,
    /// Some expert (possibly the caller) already holds the conversation.
    AlreadyAssigned,
}

/// Provides lifecycle and visibility operations for conversations.
pub struct ConversationRepo;

impl ConversationRepo {
    /// Insert a new conversation into the waiting queue.
    pub async fn create(
        pool: &PgPool,
        initiator_id: DbId,
        title: &str,
    ) -> Result<Conversation, sqlx::Error> {
        let query = format!(
            "INSERT INTO conversations (title, status, initiator_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conversation>(&query)
            .bind(title)
            .bind(CONVERSATION_WAITING)
            .bind(initiator_id)
            .fetch_one(pool)
            .await
    }

    /// Find a conversation by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Conversation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM conversations WHERE id = $1");
        sqlx::query_as::<_, Conversation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether any conversation is currently assigned to this user.
    ///
    /// This is what flips a user into expert mode: visibility derives from
    /// live assignment state, never from a stored role flag.
    pub async fn has_assigned(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM conversations WHERE assigned_expert_id = $1)",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// List the conversations visible to a user, most recently updated first.
    ///
    /// A user holding at least one assignment sees the union of initiated,
    /// assigned, and waiting conversations; everyone else sees only what they
    /// initiated.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ConversationSummary>, sqlx::Error> {
        let filter = if Self::has_assigned(pool, user_id).await? {
            EXPERT_VISIBILITY
        } else {
            INITIATOR_VISIBILITY
        };
        let query = summary_query(filter, "c.updated_at DESC");
        sqlx::query_as::<_, ConversationSummary>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The ids of every conversation in the user's visible set. Used as the
    /// coarse filter for message polling.
    pub async fn visible_ids_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let filter = if Self::has_assigned(pool, user_id).await? {
            EXPERT_VISIBILITY
        } else {
            INITIATOR_VISIBILITY
        };
        let query = format!("SELECT c.id FROM conversations c WHERE {filter}");
        let rows: Vec<(DbId,)> = sqlx::query_as(&query).bind(user_id).fetch_all(pool).await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Fetch a single conversation as a viewer-relative summary.
    pub async fn summary_by_id(
        pool: &PgPool,
        id: DbId,
        viewer_id: DbId,
    ) -> Result<Option<ConversationSummary>, sqlx::Error> {
        let query = summary_query("c.id = $2", "c.id");
        sqlx::query_as::<_, ConversationSummary>(&query)
            .bind(viewer_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Visible conversations updated strictly after `since`, newest first.
    pub async fn updates_for_user(
        pool: &PgPool,
        user_id: DbId,
        since: Option<Timestamp>,
    ) -> Result<Vec<ConversationSummary>, sqlx::Error> {
        let filter = if Self::has_assigned(pool, user_id).await? {
            EXPERT_VISIBILITY
        } else {
            INITIATOR_VISIBILITY
        };
        match since {
            Some(since) => {
                let query = summary_query(
                    &format!("{filter} AND c.updated_at > $2"),
                    "c.updated_at DESC",
                );
                sqlx::query_as::<_, ConversationSummary>(&query)
                    .bind(user_id)
                    .bind(since)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = summary_query(filter, "c.updated_at DESC");
                sqlx::query_as::<_, ConversationSummary>(&query)
                    .bind(user_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// The waiting queue: unclaimed conversations, oldest first.
    pub async fn waiting_summaries(
        pool: &PgPool,
        viewer_id: DbId,
        since: Option<Timestamp>,
    ) -> Result<Vec<ConversationSummary>, sqlx::Error> {
        const WAITING: &str = "c.status = 'waiting' AND c.assigned_expert_id IS NULL";
        match since {
            Some(since) => {
                let query = summary_query(
                    &format!("{WAITING} AND c.updated_at > $2"),
                    "c.created_at ASC",
                );
                sqlx::query_as::<_, ConversationSummary>(&query)
                    .bind(viewer_id)
                    .bind(since)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = summary_query(WAITING, "c.created_at ASC");
                sqlx::query_as::<_, ConversationSummary>(&query)
                    .bind(viewer_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Conversations currently assigned to this expert, most recently
    /// updated first.
    pub async fn assigned_summaries(
        pool: &PgPool,
        expert_user_id: DbId,
        since: Option<Timestamp>,
    ) -> Result<Vec<ConversationSummary>, sqlx::Error> {
        const ASSIGNED: &str = "c.assigned_expert_id = $1";
        match since {
            Some(since) => {
                let query = summary_query(
                    &format!("{ASSIGNED} AND c.updated_at > $2"),
                    "c.updated_at DESC",
                );
                sqlx::query_as::<_, ConversationSummary>(&query)
                    .bind(expert_user_id)
                    .bind(since)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = summary_query(ASSIGNED, "c.updated_at DESC");
                sqlx::query_as::<_, ConversationSummary>(&query)
                    .bind(expert_user_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Attempt to claim a waiting conversation for an expert.
    ///
    /// The assignment check and the assignment itself are one conditional
    /// UPDATE, so concurrent claims on the same conversation serialize at the
    /// row level and exactly one wins. The winning claim opens an active
    /// assignment record in the same transaction.
    ///
    /// The conversation must already be known to exist; callers resolve
    /// missing ids to a not-found error before calling this.
    pub async fn claim(
        pool: &PgPool,
        conversation_id: DbId,
        expert_user_id: DbId,
        expert_profile_id: DbId,
    ) -> Result<ClaimOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE conversations
             SET assigned_expert_id = $2, status = $3
             WHERE id = $1 AND assigned_expert_id IS NULL",
        )
        .bind(conversation_id)
        .bind(expert_user_id)
        .bind(CONVERSATION_ACTIVE)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(ClaimOutcome::AlreadyAssigned);
        }

        sqlx::query(
            "INSERT INTO expert_assignments (conversation_id, expert_id, status, assigned_at)
             VALUES ($1, $2, $3, NOW())",
        )
        .bind(conversation_id)
        .bind(expert_profile_id)
        .bind(ASSIGNMENT_ACTIVE)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ClaimOutcome::Claimed)
    }

    /// Return a conversation to the waiting queue and resolve the expert's
    /// open assignment record.
    ///
    /// If no open assignment exists the conversation transition still
    /// proceeds; this is a recovery path for inconsistent state, not an
    /// error. Callers verify the caller is the assigned expert first.
    pub async fn unclaim(
        pool: &PgPool,
        conversation_id: DbId,
        expert_profile_id: DbId,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE conversations
             SET assigned_expert_id = NULL, status = $2
             WHERE id = $1",
        )
        .bind(conversation_id)
        .bind(CONVERSATION_WAITING)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE expert_assignments
             SET status = $3, resolved_at = NOW()
             WHERE conversation_id = $1 AND expert_id = $2 AND status = $4",
        )
        .bind(conversation_id)
        .bind(expert_profile_id)
        .bind(ASSIGNMENT_RESOLVED)
        .bind(ASSIGNMENT_ACTIVE)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
