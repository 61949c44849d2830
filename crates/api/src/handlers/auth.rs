//! Handlers for the `/auth` resource: registration, login, identity.

use axum::extract::State;
use axum::Json;
use mentorbridge_core::error::CoreError;
use mentorbridge_core::roles::{ROLE_MENTEE, ROLE_MENTOR};
use mentorbridge_db::models::user::{CreateUser, UserResponse};
use mentorbridge_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// `"mentor"` or `"mentee"`. Admins are seeded, not registered.
    pub role: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/v1/auth/register
///
/// Create an account. Mentors start unapproved and stay out of the
/// directory until an admin approves them; mentees are usable immediately.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Json<UserResponse>> {
    if input.role != ROLE_MENTOR && input.role != ROLE_MENTEE {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid role '{}'. Must be 'mentor' or 'mentee'",
            input.role
        ))));
    }
    if input.username.trim().is_empty() || input.email.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "username and email must not be empty".into(),
        )));
    }
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            role: input.role.clone(),
            is_approved: input.role == ROLE_MENTEE,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");
    Ok(Json(user.into()))
}

/// POST /api/v1/auth/login
///
/// Verify credentials and return an access token plus the user record.
/// Inactive accounts are refused with 403.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid credentials".into()))
        })?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    let user: UserResponse = user.into();
    Ok(Json(serde_json::json!({
        "access_token": access_token,
        "expires_in": expires_in,
        "user": user,
    })))
}

/// GET /api/v1/auth/me
///
/// Return the authenticated user's record.
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(user.into()))
}
