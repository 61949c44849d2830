//! Handlers for the `/messages` resource.
//!
//! Messages are plain CRUD, but every operation goes through the
//! connection access guard: only the two parties of an accepted
//! connection may exchange or read its messages.

use axum::extract::{Query, State};
use axum::Json;
use mentorbridge_core::connection::ConnectionStatus;
use mentorbridge_core::error::CoreError;
use mentorbridge_core::types::DbId;
use mentorbridge_db::models::message::{Message, SendMessage};
use mentorbridge_db::repositories::MessageRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::connection::authorize_connection_access;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /messages` and `POST /messages/read`.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub connection_id: DbId,
}

/// POST /api/v1/messages
///
/// Send a message to the counterpart of an accepted connection.
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SendMessage>,
) -> AppResult<Json<Message>> {
    let connection =
        authorize_connection_access(&state.pool, input.connection_id, auth.user_id).await?;
    if connection.status != ConnectionStatus::Accepted {
        return Err(AppError::Core(CoreError::Forbidden(
            "Messaging requires an accepted connection".into(),
        )));
    }
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "content must not be empty".into(),
        )));
    }

    let recipient_id = connection.counterpart_of(auth.user_id);
    let message = MessageRepo::create(
        &state.pool,
        connection.id,
        auth.user_id,
        recipient_id,
        &input.content,
    )
    .await?;

    Ok(Json(message))
}

/// GET /api/v1/messages?connection_id=
///
/// List the message thread of a connection, oldest first.
pub async fn list_messages(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MessageQuery>,
) -> AppResult<Json<serde_json::Value>> {
    authorize_connection_access(&state.pool, params.connection_id, auth.user_id).await?;

    let messages = MessageRepo::list_for_connection(&state.pool, params.connection_id).await?;
    Ok(Json(serde_json::json!({ "data": messages })))
}

/// POST /api/v1/messages/read?connection_id=
///
/// Mark all messages addressed to the authenticated user in a connection
/// as read. Returns the number of messages marked.
pub async fn mark_messages_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MessageQuery>,
) -> AppResult<Json<serde_json::Value>> {
    authorize_connection_access(&state.pool, params.connection_id, auth.user_id).await?;

    let count = MessageRepo::mark_read(&state.pool, params.connection_id, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "data": { "marked_read": count } })))
}
