//! Repository for the `expert_profiles` table.

use peerline_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::expert_profile::{ExpertProfile, UpdateExpertProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, bio, knowledge_base_links, created_at, updated_at";

/// Provides read/update operations for expert profiles. Creation happens
/// inside [`crate::repositories::UserRepo::create`].
pub struct ExpertProfileRepo;

impl ExpertProfileRepo {
    /// Find the profile owned by the given user.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<ExpertProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM expert_profiles WHERE user_id = $1");
        sqlx::query_as::<_, ExpertProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the bio and knowledge-base links on a user's profile.
    ///
    /// Returns `None` if the user has no profile row.
    pub async fn update_for_user(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateExpertProfile,
    ) -> Result<Option<ExpertProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE expert_profiles
             SET bio = $2, knowledge_base_links = $3
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExpertProfile>(&query)
            .bind(user_id)
            .bind(&input.bio)
            .bind(Json(&input.knowledge_base_links))
            .fetch_optional(pool)
            .await
    }
}
