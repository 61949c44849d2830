//! Handlers for the `/connections` resource: the connection lifecycle.
//!
//! Also home of [`authorize_connection_access`], the sole access-control
//! guard for everything scoped to a connection (sessions, messages).

use axum::extract::{Path, Query, State};
use axum::Json;
use mentorbridge_core::connection::{validate_decision, ConnectionStatus};
use mentorbridge_core::error::CoreError;
use mentorbridge_core::roles::{ROLE_MENTEE, ROLE_MENTOR};
use mentorbridge_core::types::DbId;
use mentorbridge_db::models::connection::{Connection, DecideConnection, RequestConnection};
use mentorbridge_db::repositories::{ConnectionRepo, UserRepo};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notify::Event;
use crate::state::AppState;

/// Fetch a connection and verify that `user_id` is one of its two parties.
///
/// This is the single authorization gate for all connection-scoped data:
/// every session and message operation calls it before touching rows.
/// Fails with `NotFound` for a dangling id and `Forbidden` for a
/// non-member.
pub async fn authorize_connection_access(
    pool: &PgPool,
    connection_id: DbId,
    user_id: DbId,
) -> Result<Connection, AppError> {
    let connection = ConnectionRepo::find_by_id(pool, connection_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Connection",
            id: connection_id,
        }))?;

    if !connection.is_member(user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not a party to this connection".into(),
        )));
    }

    Ok(connection)
}

// ---------------------------------------------------------------------------
// Query / request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /connections`.
#[derive(Debug, Deserialize)]
pub struct ConnectionQuery {
    /// Restrict to the side the user plays: `"mentor"` or `"mentee"`.
    pub role: Option<String>,
    /// Filter by status (case-insensitive).
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/connections
///
/// Mentee-initiated connection request. A request against a REJECTED pair
/// reopens the existing row back to PENDING; any other existing row is a
/// conflict, reported with the existing status so the client can branch.
pub async fn request_connection(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RequestConnection>,
) -> AppResult<Json<Connection>> {
    if auth.role != ROLE_MENTEE {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only mentees may request connections".into(),
        )));
    }

    let mentor = UserRepo::find_by_id(&state.pool, input.mentor_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.mentor_id,
        }))?;
    if mentor.role != ROLE_MENTOR || !mentor.is_approved || !mentor.is_active {
        return Err(AppError::Core(CoreError::Validation(
            "Target user is not an approved mentor".into(),
        )));
    }

    let mentee = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let message = input.message.as_deref();
    let existing = ConnectionRepo::find_pair(&state.pool, mentor.id, mentee.id).await?;

    let connection = match existing {
        None => ConnectionRepo::create(&state.pool, mentor.id, mentee.id, message).await?,
        Some(conn) if conn.status == ConnectionStatus::Rejected => {
            // Re-request after rejection reuses the row.
            ConnectionRepo::reopen(&state.pool, conn.id, message)
                .await?
                .ok_or_else(|| conflict_with_status(conn.status))?
        }
        Some(conn) => return Err(conflict_with_status(conn.status)),
    };

    state
        .notifier
        .emit(Event::ConnectionRequested {
            connection_id: connection.id,
            mentor_id: mentor.id,
            mentee_id: mentee.id,
            mentee_name: mentee.username,
            mentor_name: mentor.username,
        })
        .await;

    tracing::info!(
        connection_id = connection.id,
        mentor_id = mentor.id,
        mentee_id = mentee.id,
        "Connection requested"
    );
    Ok(Json(connection))
}

/// Build the duplicate-request conflict, carrying the existing status so
/// the caller can branch UI.
fn conflict_with_status(status: ConnectionStatus) -> AppError {
    AppError::ConflictWithDetails {
        message: "Connection already exists".to_string(),
        details: serde_json::json!({ "existing_status": status }),
    }
}

/// PUT /api/v1/connections/{id}
///
/// The mentor's decision on a pending request: ACCEPTED or REJECTED, once.
pub async fn decide_connection(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(connection_id): Path<DbId>,
    Json(input): Json<DecideConnection>,
) -> AppResult<Json<Connection>> {
    let decision: ConnectionStatus = input.status.parse().map_err(AppError::Core)?;

    let connection = ConnectionRepo::find_by_id(&state.pool, connection_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Connection",
            id: connection_id,
        }))?;

    // Only the mentor of this connection may decide it.
    if connection.mentor_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the mentor may decide a connection request".into(),
        )));
    }

    validate_decision(connection.status, decision).map_err(AppError::Core)?;

    // The conditional update makes concurrent decisions lose cleanly.
    let updated = ConnectionRepo::decide(&state.pool, connection_id, decision)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::InvalidTransition(
                "Connection has already been decided".into(),
            ))
        })?;

    let mentor = UserRepo::find_by_id(&state.pool, updated.mentor_id).await?;
    let mentee = UserRepo::find_by_id(&state.pool, updated.mentee_id).await?;
    let mentor_name = mentor.map(|u| u.username).unwrap_or_default();
    let mentee_name = mentee.map(|u| u.username).unwrap_or_default();

    let event = match decision {
        ConnectionStatus::Accepted => Event::ConnectionAccepted {
            connection_id: updated.id,
            mentor_id: updated.mentor_id,
            mentee_id: updated.mentee_id,
            mentor_name,
            mentee_name,
        },
        _ => Event::ConnectionRejected {
            connection_id: updated.id,
            mentee_id: updated.mentee_id,
            mentor_name,
        },
    };
    state.notifier.emit(event).await;

    tracing::info!(
        connection_id = updated.id,
        decision = %decision,
        "Connection decided"
    );
    Ok(Json(updated))
}

/// GET /api/v1/connections
///
/// List the authenticated user's connections with the counterpart's
/// profile summary, most recently created first.
pub async fn list_connections(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ConnectionQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<ConnectionStatus>)
        .transpose()
        .map_err(AppError::Core)?;

    let connections = ConnectionRepo::list_for_user(
        &state.pool,
        auth.user_id,
        params.role.as_deref(),
        status,
    )
    .await?;

    Ok(Json(serde_json::json!({ "data": connections })))
}
