//! Route definitions for the `/connections` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::connection;
use crate::state::AppState;

/// Routes mounted at `/connections`.
///
/// ```text
/// POST /      -> request_connection (mentee only)
/// GET  /      -> list_connections (?role=&status=)
/// PUT  /{id}  -> decide_connection (mentor only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(connection::list_connections).post(connection::request_connection),
        )
        .route("/{id}", put(connection::decide_connection))
}
