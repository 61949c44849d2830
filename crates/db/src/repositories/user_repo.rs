//! Repository for the `users` table.

use mentorbridge_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, MentorSummary, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, username, email, password_hash, role, is_approved, is_active, \
                       created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role, is_approved)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(input.is_approved)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List approved, active mentors with their profile summary.
    pub async fn list_mentors(pool: &PgPool) -> Result<Vec<MentorSummary>, sqlx::Error> {
        sqlx::query_as::<_, MentorSummary>(
            "SELECT u.id, u.username, p.bio, p.skills, p.picture_url, p.location
             FROM users u
             LEFT JOIN profiles p ON p.user_id = u.id
             WHERE u.role = 'mentor' AND u.is_approved AND u.is_active
             ORDER BY u.username",
        )
        .fetch_all(pool)
        .await
    }

    /// Approve a mentor. Returns `true` if a row was updated.
    pub async fn approve(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_approved = TRUE, updated_at = NOW()
             WHERE id = $1 AND role = 'mentor' AND NOT is_approved",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deactivate a user. Returns `true` if a row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
