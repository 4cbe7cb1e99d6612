use std::sync::Arc;

use esante_events::EmailDelivery;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: esante_db::DbPool,
    /// Server configuration (JWT settings, media root, public URLs).
    pub config: Arc<ServerConfig>,
    /// Outbound e-mail. `None` when SMTP is not configured.
    pub email: Option<Arc<EmailDelivery>>,
}
