//! Route definitions for the `/centers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::centers;
use crate::state::AppState;

/// Routes mounted at `/centers`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(centers::list_centers).post(centers::create_center))
}
