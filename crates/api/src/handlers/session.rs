//! Handlers for the `/sessions` resource: proposing, transitioning, and
//! listing mentorship sessions.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use mentorbridge_core::connection::ConnectionStatus;
use mentorbridge_core::error::CoreError;
use mentorbridge_core::scheduling::validate_interval;
use mentorbridge_core::session::{
    bucket_for, is_mentor_only, validate_transition, SessionStatus,
};
use mentorbridge_core::types::{DbId, Timestamp};
use mentorbridge_db::models::session::{
    NewSession, ProposeSession, Session, SessionWithCounterpart, TransitionSession,
};
use mentorbridge_db::repositories::{SessionRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::connection::authorize_connection_access;
use crate::middleware::auth::AuthUser;
use crate::notify::Event;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /sessions`.
#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    /// Restrict to the side the user plays: `"mentor"` or `"mentee"`.
    pub role: Option<String>,
    pub connection_id: Option<DbId>,
    /// Inclusive lower bound on `start_time`.
    pub start_date: Option<Timestamp>,
    /// Inclusive upper bound on `start_time`.
    pub end_date: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions
///
/// Propose a session on an accepted connection. The slot must be free
/// within that connection (inclusive-bounds overlap, checked atomically
/// against concurrent proposals). A mentor-created session is born
/// SCHEDULED; a mentee proposal is PENDING until the mentor approves.
pub async fn propose_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ProposeSession>,
) -> AppResult<Json<Session>> {
    let connection =
        authorize_connection_access(&state.pool, input.connection_id, auth.user_id).await?;

    if connection.status != ConnectionStatus::Accepted {
        return Err(AppError::Core(CoreError::Forbidden(
            "Sessions require an accepted connection".into(),
        )));
    }
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    validate_interval(input.start_time, input.end_time).map_err(AppError::Core)?;

    let is_mentor = connection.mentor_id == auth.user_id;
    let status = SessionStatus::initial_for(is_mentor);

    let session = SessionRepo::create_checked(
        &state.pool,
        &NewSession {
            connection_id: connection.id,
            title: &input.title,
            description: input.description.as_deref(),
            start_time: input.start_time,
            end_time: input.end_time,
            status,
            created_by: auth.user_id,
        },
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict("Time slot is already booked".into()))
    })?;

    let counterpart_id = connection.counterpart_of(auth.user_id);
    let proposer = UserRepo::find_by_id(&state.pool, auth.user_id).await?;
    let proposer_name = proposer.map(|u| u.username).unwrap_or_default();

    let event = if status == SessionStatus::Scheduled {
        Event::SessionScheduled {
            session_id: session.id,
            recipient_id: counterpart_id,
            title: session.title.clone(),
        }
    } else {
        Event::SessionProposed {
            session_id: session.id,
            recipient_id: counterpart_id,
            proposer_name,
            title: session.title.clone(),
        }
    };
    state.notifier.emit(event).await;

    tracing::info!(
        session_id = session.id,
        connection_id = connection.id,
        status = %session.status,
        "Session proposed"
    );
    Ok(Json(session))
}

/// PATCH /api/v1/sessions/{id}/status
///
/// Transition a session along the state machine. Approval transitions
/// (out of PENDING) are mentor-only; completing or cancelling a SCHEDULED
/// session is open to either party. Notes may accompany COMPLETED.
pub async fn transition_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
    Json(input): Json<TransitionSession>,
) -> AppResult<Json<Session>> {
    let new_status: SessionStatus = input.status.parse().map_err(AppError::Core)?;

    let session = SessionRepo::find_by_id(&state.pool, session_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Session",
            id: session_id,
        }))?;

    let connection =
        authorize_connection_access(&state.pool, session.connection_id, auth.user_id).await?;

    validate_transition(session.status, new_status).map_err(AppError::Core)?;

    if is_mentor_only(session.status) && connection.mentor_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the mentor may approve or decline a session".into(),
        )));
    }

    // The conditional update makes concurrent transitions lose cleanly.
    let updated = SessionRepo::transition(
        &state.pool,
        session_id,
        session.status,
        new_status,
        input.notes.as_deref(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::InvalidTransition(
            "Session was modified concurrently".into(),
        ))
    })?;

    let recipient_id = connection.counterpart_of(auth.user_id);
    let event = match new_status {
        SessionStatus::Scheduled => Event::SessionScheduled {
            session_id: updated.id,
            recipient_id,
            title: updated.title.clone(),
        },
        SessionStatus::Declined => Event::SessionDeclined {
            session_id: updated.id,
            recipient_id,
            title: updated.title.clone(),
        },
        SessionStatus::Completed => Event::SessionCompleted {
            session_id: updated.id,
            recipient_id,
            title: updated.title.clone(),
        },
        _ => Event::SessionCancelled {
            session_id: updated.id,
            recipient_id,
            title: updated.title.clone(),
        },
    };
    state.notifier.emit(event).await;

    tracing::info!(
        session_id = updated.id,
        status = %updated.status,
        "Session transitioned"
    );
    Ok(Json(updated))
}

/// GET /api/v1/sessions
///
/// List the authenticated user's sessions, partitioned into the
/// client-visible buckets (upcoming / pending / past / cancelled).
/// Buckets are recomputed from the current clock on every call.
pub async fn list_sessions(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let sessions = SessionRepo::list_for_user(
        &state.pool,
        auth.user_id,
        params.role.as_deref(),
        params.connection_id,
        params.start_date,
        params.end_date,
    )
    .await?;

    let now = Utc::now();
    let mut buckets: BTreeMap<&'static str, Vec<SessionWithCounterpart>> = BTreeMap::from([
        ("upcoming", Vec::new()),
        ("pending", Vec::new()),
        ("past", Vec::new()),
        ("cancelled", Vec::new()),
    ]);
    for session in sessions {
        let bucket = bucket_for(session.status, session.start_time, now);
        buckets.entry(bucket.as_str()).or_default().push(session);
    }

    Ok(Json(serde_json::json!({ "data": buckets })))
}
