//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /              -> list_notifications (?unread_only, limit, offset)
/// DELETE /              -> clear_notifications
/// POST   /read-all      -> mark_all_notifications_read
/// GET    /unread-count  -> unread_count
/// POST   /{id}/read     -> mark_notification_read
/// DELETE /{id}          -> delete_notification
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(notification::list_notifications).delete(notification::clear_notifications),
        )
        .route("/read-all", post(notification::mark_all_notifications_read))
        .route("/unread-count", get(notification::unread_count))
        .route("/{id}/read", post(notification::mark_notification_read))
        .route("/{id}", delete(notification::delete_notification))
}
