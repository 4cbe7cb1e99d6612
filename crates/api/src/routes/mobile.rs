//! Route definitions for the `/mobile` resource (mothers' app).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::mobile;
use crate::state::AppState;

/// Routes mounted at `/mobile`.
///
/// ```text
/// POST  /auth/qr-login        -> qr_login (public)
/// GET   /verify-qr            -> verify_qr (public)
/// GET   /profile              -> get_profile
/// PATCH /profile              -> update_profile (mother token)
/// GET   /health-record        -> health_record
/// GET   /full-health-record   -> full_health_record
/// GET   /pregnancies/{id}     -> get_pregnancy
/// GET   /consultations        -> consultations
/// GET   /vaccinations         -> vaccinations
/// GET   /appointments         -> appointments
/// GET   /medical-history      -> medical_history
/// GET   /messages             -> messages
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/qr-login", post(mobile::qr_login))
        .route("/verify-qr", get(mobile::verify_qr))
        .route(
            "/profile",
            get(mobile::get_profile).patch(mobile::update_profile),
        )
        .route("/health-record", get(mobile::health_record))
        .route("/full-health-record", get(mobile::full_health_record))
        .route("/pregnancies/{id}", get(mobile::get_pregnancy))
        .route("/consultations", get(mobile::consultations))
        .route("/vaccinations", get(mobile::vaccinations))
        .route("/appointments", get(mobile::appointments))
        .route("/medical-history", get(mobile::medical_history))
        .route("/messages", get(mobile::messages))
}
