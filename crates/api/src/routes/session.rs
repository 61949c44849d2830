//! Route definitions for the `/sessions` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Routes mounted at `/sessions`.
///
/// ```text
/// POST  /             -> propose_session
/// GET   /             -> list_sessions (?role=&connection_id=&start_date=&end_date=)
/// PATCH /{id}/status  -> transition_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(session::list_sessions).post(session::propose_session),
        )
        .route("/{id}/status", patch(session::transition_session))
}
