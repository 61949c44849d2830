//! User entity model and DTOs.

use mentorbridge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// Role name: `"admin"`, `"mentor"`, or `"mentee"`.
    pub role: String,
    /// Gates mentor visibility in the directory. Mentees and admins are
    /// approved at creation.
    pub is_approved: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_approved: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            is_approved: user.is_approved,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_approved: bool,
}

/// Approved mentor with profile summary, as listed in the directory.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MentorSummary {
    pub id: DbId,
    pub username: String,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub picture_url: Option<String>,
    pub location: Option<String>,
}
