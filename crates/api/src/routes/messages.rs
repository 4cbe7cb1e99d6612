//! Route definitions for the `/messages` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

/// Routes mounted at `/messages`. All require the ministry role.
///
/// ```text
/// GET    /               -> list_messages
/// POST   /               -> create_message
/// GET    /{id}           -> get_message (counts a view)
/// PATCH  /{id}           -> update_message
/// DELETE /{id}           -> delete_message
/// POST   /{id}/publish   -> publish_message
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(messages::list_messages).post(messages::create_message),
        )
        .route(
            "/{id}",
            get(messages::get_message)
                .patch(messages::update_message)
                .delete(messages::delete_message),
        )
        .route("/{id}/publish", post(messages::publish_message))
}
