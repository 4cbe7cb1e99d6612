//! Route definitions for the `/carnet/{qr_code}` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::carnet;
use crate::state::AppState;

/// Routes mounted at `/carnet`. Every path starts with the card code.
///
/// ```text
/// POST                /{qr}/scan
/// GET, POST           /{qr}/pregnancies
/// GET, PUT            /{qr}/current-pregnancy
/// GET, POST           /{qr}/children
/// GET, POST           /{qr}/medical-history
/// PUT, DELETE         /{qr}/medical-history/{id}
/// GET, POST, PUT      /{qr}/spouse
/// GET, POST           /{qr}/consultations
/// PUT, DELETE         /{qr}/consultations/{id}
/// GET, POST           /{qr}/vaccinations
/// PUT, DELETE         /{qr}/vaccinations/{id}
/// GET, POST           /{qr}/exams
/// PUT, DELETE         /{qr}/exams/{id}
/// GET, POST           /{qr}/treatments
/// GET, POST           /{qr}/evolutions
/// GET, POST, PUT      /{qr}/birth-plan
/// GET, POST           /{qr}/appointments
/// PUT, DELETE         /{qr}/appointments/{id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{qr}/scan", post(carnet::scan))
        .route(
            "/{qr}/pregnancies",
            get(carnet::list_pregnancies).post(carnet::create_pregnancy),
        )
        .route(
            "/{qr}/current-pregnancy",
            get(carnet::get_current_pregnancy).put(carnet::update_current_pregnancy),
        )
        .route(
            "/{qr}/children",
            get(carnet::list_children).post(carnet::create_child),
        )
        .route(
            "/{qr}/medical-history",
            get(carnet::list_medical_history).post(carnet::create_medical_history),
        )
        .route(
            "/{qr}/medical-history/{id}",
            put(carnet::update_medical_history).delete(carnet::delete_medical_history),
        )
        .route(
            "/{qr}/spouse",
            get(carnet::get_spouse)
                .post(carnet::create_spouse)
                .put(carnet::update_spouse),
        )
        .route(
            "/{qr}/consultations",
            get(carnet::list_consultations).post(carnet::create_consultation),
        )
        .route(
            "/{qr}/consultations/{id}",
            put(carnet::update_consultation).delete(carnet::delete_consultation),
        )
        .route(
            "/{qr}/vaccinations",
            get(carnet::list_vaccinations).post(carnet::create_vaccination),
        )
        .route(
            "/{qr}/vaccinations/{id}",
            put(carnet::update_vaccination).delete(carnet::delete_vaccination),
        )
        .route(
            "/{qr}/exams",
            get(carnet::list_exams).post(carnet::create_exam),
        )
        .route(
            "/{qr}/exams/{id}",
            put(carnet::update_exam).delete(carnet::delete_exam),
        )
        .route(
            "/{qr}/treatments",
            get(carnet::list_treatments).post(carnet::create_treatment),
        )
        .route(
            "/{qr}/evolutions",
            get(carnet::list_evolutions).post(carnet::create_evolution),
        )
        .route(
            "/{qr}/birth-plan",
            get(carnet::get_birth_plan)
                .post(carnet::create_birth_plan)
                .put(carnet::update_birth_plan),
        )
        .route(
            "/{qr}/appointments",
            get(carnet::list_appointments).post(carnet::create_appointment),
        )
        .route(
            "/{qr}/appointments/{id}",
            put(carnet::update_appointment).delete(carnet::delete_appointment),
        )
}
