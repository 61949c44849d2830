//! Repository for the `profiles` table.

use mentorbridge_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{Profile, UpdateProfile};

/// Column list for `profiles` queries.
const COLUMNS: &str = "id, user_id, bio, skills, picture_url, location, created_at, updated_at";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find a profile by its owner's user ID.
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or update a user's profile. Only non-`None` fields in `input`
    /// are applied on update.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, bio, skills, picture_url, location)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_profiles_user DO UPDATE SET
                bio = COALESCE($2, profiles.bio),
                skills = COALESCE($3, profiles.skills),
                picture_url = COALESCE($4, profiles.picture_url),
                location = COALESCE($5, profiles.location),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.bio)
            .bind(&input.skills)
            .bind(&input.picture_url)
            .bind(&input.location)
            .fetch_one(pool)
            .await
    }
}
