//! Handlers for the `/centers` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use esante_core::error::CoreError;
use esante_db::models::health_center::{CreateHealthCenter, HealthCenter, HealthCenterWithCount};
use esante_db::repositories::HealthCenterRepo;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireMinistry};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/centers
///
/// All centers ordered by name, each with its number of registered mothers.
pub async fn list_centers(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<HealthCenterWithCount>>>> {
    let centers = HealthCenterRepo::list_with_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: centers }))
}

/// POST /api/v1/centers
pub async fn create_center(
    State(state): State<AppState>,
    RequireMinistry(admin): RequireMinistry,
    Json(input): Json<CreateHealthCenter>,
) -> AppResult<(StatusCode, Json<HealthCenter>)> {
    if input.name.trim().is_empty() {
        return Err(CoreError::required("name").into());
    }
    if input.code.trim().is_empty() {
        return Err(CoreError::required("code").into());
    }

    let center = HealthCenterRepo::create(&state.pool, &input).await?;
    tracing::info!(
        center_id = center.id,
        code = %center.code,
        created_by = admin.user_id,
        "Health center created",
    );
    Ok((StatusCode::CREATED, Json(center)))
}
