//! Route definitions for the `/accounts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::accounts;
use crate::state::AppState;

/// Routes mounted at `/accounts`.
///
/// ```text
/// GET    /me           -> get_me
/// PATCH  /me           -> update_me
/// GET    /users        -> list_users (ministry)
/// POST   /users        -> create_user (ministry)
/// GET    /users/{id}   -> get_user (ministry)
/// PATCH  /users/{id}   -> update_user (ministry)
/// DELETE /users/{id}   -> deactivate_user (ministry)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(accounts::get_me).patch(accounts::update_me))
        .route(
            "/users",
            get(accounts::list_users).post(accounts::create_user),
        )
        .route(
            "/users/{id}",
            get(accounts::get_user)
                .patch(accounts::update_user)
                .delete(accounts::deactivate_user),
        )
}
