//! Route definitions for the `/messages` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::message;
use crate::state::AppState;

/// Routes mounted at `/messages`.
///
/// ```text
/// POST /       -> send_message
/// GET  /       -> list_messages (?connection_id=)
/// POST /read   -> mark_messages_read (?connection_id=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(message::list_messages).post(message::send_message),
        )
        .route("/read", post(message::mark_messages_read))
}
