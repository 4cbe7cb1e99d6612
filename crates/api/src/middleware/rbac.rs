//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! match. Use these in route handlers to enforce authorization at the type
//! level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use esante_core::error::CoreError;
use esante_core::roles::{ROLE_HEALTH_WORKER, ROLE_MINISTRY};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `MINISTRY` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn ministry_only(RequireMinistry(user): RequireMinistry) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireMinistry(pub AuthUser);

impl FromRequestParts<AppState> for RequireMinistry {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_MINISTRY {
            return Err(AppError::Core(CoreError::Forbidden(
                "Ministry role required".into(),
            )));
        }
        Ok(RequireMinistry(user))
    }
}

/// Requires the `HEALTH_WORKER` role. Rejects with 403 Forbidden otherwise.
pub struct RequireHealthWorker(pub AuthUser);

impl FromRequestParts<AppState> for RequireHealthWorker {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_HEALTH_WORKER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Health worker role required".into(),
            )));
        }
        Ok(RequireHealthWorker(user))
    }
}

/// Requires any authenticated staff user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for route
/// definitions where "this route requires authentication" should be
/// self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
