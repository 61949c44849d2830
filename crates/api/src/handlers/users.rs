//! Handlers for the user directory: mentor listing, profiles, approval.

use axum::extract::{Path, State};
use axum::Json;
use mentorbridge_core::error::CoreError;
use mentorbridge_core::roles::ROLE_ADMIN;
use mentorbridge_core::types::DbId;
use mentorbridge_db::models::profile::{Profile, UpdateProfile};
use mentorbridge_db::repositories::{ProfileRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/mentors
///
/// List approved, active mentors with their profile summaries.
pub async fn list_mentors(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let mentors = UserRepo::list_mentors(&state.pool).await?;
    Ok(Json(serde_json::json!({ "data": mentors })))
}

/// GET /api/v1/profile
///
/// Return the authenticated user's own profile, or an empty object if they
/// have not created one yet.
pub async fn get_own_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let profile = ProfileRepo::find_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "data": profile })))
}

/// PUT /api/v1/profile
///
/// Create or update the authenticated user's profile.
pub async fn update_own_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<Profile>> {
    let profile = ProfileRepo::upsert(&state.pool, auth.user_id, &input).await?;
    Ok(Json(profile))
}

/// GET /api/v1/users/{id}/profile
///
/// Return another user's profile (used to decorate connection views).
pub async fn get_user_profile(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Profile>> {
    let profile = ProfileRepo::find_by_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user_id,
        }))?;
    Ok(Json(profile))
}

/// POST /api/v1/admin/mentors/{id}/approve
///
/// Approve a mentor so they become visible in the directory. Admin only.
pub async fn approve_mentor(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    if auth.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins may approve mentors".into(),
        )));
    }

    let approved = UserRepo::approve(&state.pool, user_id).await?;
    if !approved {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Mentor",
            id: user_id,
        }));
    }

    tracing::info!(mentor_id = user_id, "Mentor approved");
    Ok(Json(serde_json::json!({ "data": { "approved": true } })))
}
