//! Route definitions for the `/mothers` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::mothers;
use crate::state::AppState;

/// Routes mounted at `/mothers`.
///
/// ```text
/// GET  /             -> list_mothers
/// GET  /recent       -> recent_mothers
/// POST /add-record   -> add_record (health worker)
/// GET  /{id}         -> get_mother
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(mothers::list_mothers))
        .route("/recent", get(mothers::recent_mothers))
        .route("/add-record", post(mothers::add_record))
        .route("/{id}", get(mothers::get_mother))
}
