use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Backing store every repository reads and writes through.
    pub store: fansite_db::Store,
    pub config: Arc<ServerConfig>,
}
