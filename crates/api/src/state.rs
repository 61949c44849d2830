use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notify::Notifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mentorbridge_db::DbPool,
    /// Server configuration (JWT settings, CORS, timeouts).
    pub config: Arc<ServerConfig>,
    /// Best-effort notification sink.
    pub notifier: Arc<Notifier>,
}
