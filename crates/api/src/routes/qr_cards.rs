//! Route definitions for the `/qr-cards` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::qr_cards;
use crate::state::AppState;

/// Routes mounted at `/qr-cards`.
///
/// ```text
/// GET  /          -> list_cards
/// POST /          -> create_card
/// POST /validate  -> validate_card (health worker)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(qr_cards::list_cards).post(qr_cards::create_card))
        .route("/validate", post(qr_cards::validate_card))
}
