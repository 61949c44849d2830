//! Route definitions for the mentor directory and profile endpoints.
//!
//! These routes sit at several top-level paths rather than one resource
//! prefix, so they are merged into the v1 tree instead of nested.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Directory and profile routes.
///
/// ```text
/// GET  /mentors                      -> list_mentors
/// GET  /profile                      -> get_own_profile
/// PUT  /profile                      -> update_own_profile
/// GET  /users/{id}/profile           -> get_user_profile
/// POST /admin/mentors/{id}/approve   -> approve_mentor (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mentors", get(users::list_mentors))
        .route(
            "/profile",
            get(users::get_own_profile).put(users::update_own_profile),
        )
        .route("/users/{id}/profile", get(users::get_user_profile))
        .route("/admin/mentors/{id}/approve", post(users::approve_mentor))
}
