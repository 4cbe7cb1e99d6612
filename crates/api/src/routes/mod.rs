pub mod accounts;
pub mod auth;
pub mod carnet;
pub mod centers;
pub mod health;
pub mod messages;
pub mod mobile;
pub mod mothers;
pub mod qr_cards;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (staff)
///
/// /accounts/me                                     get, update own profile
/// /accounts/users                                  list, create (ministry)
/// /accounts/users/{id}                             get, update, deactivate (ministry)
///
/// /qr-cards                                        list, create
/// /qr-cards/validate                               attach a mother (health worker)
///
/// /centers                                         list, create (create: ministry)
///
/// /mothers                                         directory
/// /mothers/recent                                  newest registrations
/// /mothers/add-record                              open a booklet (health worker)
/// /mothers/{id}                                    get
///
/// /carnet/{qr}/scan                                full dossier
/// /carnet/{qr}/pregnancies                         list, create
/// /carnet/{qr}/current-pregnancy                   get, update
/// /carnet/{qr}/children                            list, create
/// /carnet/{qr}/medical-history[/{id}]              list, create, update, delete
/// /carnet/{qr}/spouse                              get, create, update
/// /carnet/{qr}/consultations[/{id}]                list, create, update, delete
/// /carnet/{qr}/vaccinations[/{id}]                 list, create, update, delete
/// /carnet/{qr}/exams[/{id}]                        list, create, update, delete
/// /carnet/{qr}/treatments                          list, create
/// /carnet/{qr}/evolutions                          list, create
/// /carnet/{qr}/birth-plan                          get, create, update
/// /carnet/{qr}/appointments[/{id}]                 list, create, update, delete
///
/// /mobile/auth/qr-login                            mother login (public)
/// /mobile/verify-qr                                card check (public)
/// /mobile/profile                                  get, update
/// /mobile/health-record                            booklet summary
/// /mobile/full-health-record                       full dossier
/// /mobile/pregnancies/{id}                         pregnancy detail
/// /mobile/consultations                            list
/// /mobile/vaccinations                             list
/// /mobile/appointments                             upcoming / past
/// /mobile/medical-history                          grouped list
/// /mobile/messages                                 published messages
///
/// /stats/overview                                  headline counters
/// /stats/detailed                                  dashboard (ministry)
///
/// /messages                                        list, create (ministry)
/// /messages/{id}                                   get, update, delete (ministry)
/// /messages/{id}/publish                           publish (ministry)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Staff accounts.
        .nest("/accounts", accounts::router())
        // QR card registry.
        .nest("/qr-cards", qr_cards::router())
        .nest("/centers", centers::router())
        .nest("/mothers", mothers::router())
        // Health booklet, addressed by card code.
        .nest("/carnet", carnet::router())
        // Mothers' mobile app gateway.
        .nest("/mobile", mobile::router())
        .nest("/stats", stats::router())
        // Prevention messages.
        .nest("/messages", messages::router())
}
