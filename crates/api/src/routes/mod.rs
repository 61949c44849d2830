pub mod auth;
pub mod connection;
pub mod health;
pub mod message;
pub mod notification;
pub mod session;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/me                               current user (requires auth)
///
/// /mentors                               approved mentor directory (GET)
/// /profile                               own profile (GET, PUT)
/// /users/{id}/profile                    public profile (GET)
/// /admin/mentors/{id}/approve            approve mentor (POST, admin only)
///
/// /connections                           request (POST, mentee), list (GET)
/// /connections/{id}                      decide (PUT, mentor only)
///
/// /sessions                              propose (POST), list buckets (GET)
/// /sessions/{id}/status                  transition (PATCH)
///
/// /messages                              send (POST), thread (GET)
/// /messages/read                         mark thread read (POST)
///
/// /notifications                         list (GET), clear all (DELETE)
/// /notifications/read-all                mark all read (POST)
/// /notifications/unread-count            unread count (GET)
/// /notifications/{id}/read               mark read (POST)
/// /notifications/{id}                    delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (register, login, me).
        .nest("/auth", auth::router())
        // Directory and profiles.
        .merge(users::router())
        // Connection lifecycle.
        .nest("/connections", connection::router())
        // Session scheduling.
        .nest("/sessions", session::router())
        // Direct messages within connections.
        .nest("/messages", message::router())
        // Notification inbox.
        .nest("/notifications", notification::router())
}
