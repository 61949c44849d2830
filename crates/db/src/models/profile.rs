//! Profile entity model and DTOs.

use mentorbridge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub picture_url: Option<String>,
    pub location: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or updating a profile. All fields are optional;
/// omitted fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub picture_url: Option<String>,
    pub location: Option<String>,
}
