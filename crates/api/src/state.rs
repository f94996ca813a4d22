use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pressroom_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Shared outbound HTTP client (connection pooling across all blogs).
    pub http: reqwest::Client,
    /// Event bus publishing sync run completions.
    pub event_bus: Arc<pressroom_events::EventBus>,
}
