//! Handlers for the `/messages` resource: prevention messages written by the
//! ministry and read by mothers in the app.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use esante_core::error::CoreError;
use esante_core::messages::{
    published_stamp, validate_category, validate_status, validate_target, STATUS_DRAFT,
};
use esante_core::search::{normalize_search, PageRequest};
use esante_core::types::DbId;
use esante_db::models::prevention_message::{
    CreateMessage, MessageFilter, MessageStats, PreventionMessage, UpdateMessage,
};
use esante_db::repositories::PreventionMessageRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireMinistry;
use crate::response::PageResponse;
use crate::state::AppState;

/// Query parameters for `GET /messages`.
#[derive(Debug, Deserialize)]
pub struct MessageListParams {
    pub status: Option<String>,
    pub category: Option<String>,
    /// Case-insensitive substring of the title or content.
    pub search: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PreventionMessage",
        id,
    })
}

/// Reject unknown enum values in a create or update payload.
fn check_enums(
    category: Option<&str>,
    status: Option<&str>,
    target: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(category) = category {
        validate_category(category)?;
    }
    if let Some(status) = status {
        validate_status(status)?;
    }
    if let Some(target) = target {
        validate_target(target)?;
    }
    Ok(())
}

/// GET /api/v1/messages
pub async fn list_messages(
    State(state): State<AppState>,
    RequireMinistry(_admin): RequireMinistry,
    Query(params): Query<MessageListParams>,
) -> AppResult<Json<PageResponse<PreventionMessage, MessageStats>>> {
    check_enums(params.category.as_deref(), params.status.as_deref(), None)?;
    let page = PageRequest::new(params.page, params.page_size);
    let filter = MessageFilter {
        status: params.status,
        category: params.category,
        search: normalize_search(params.search.as_deref()),
    };

    let messages =
        PreventionMessageRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let total = PreventionMessageRepo::count(&state.pool, &filter).await?;
    let stats = PreventionMessageRepo::stats(&state.pool).await?;

    Ok(Json(PageResponse {
        data: messages,
        pagination: page.meta(total),
        stats,
    }))
}

/// POST /api/v1/messages
pub async fn create_message(
    State(state): State<AppState>,
    RequireMinistry(admin): RequireMinistry,
    Json(input): Json<CreateMessage>,
) -> AppResult<(StatusCode, Json<PreventionMessage>)> {
    if input.title.trim().is_empty() {
        return Err(CoreError::required("title").into());
    }
    if input.content.trim().is_empty() {
        return Err(CoreError::required("content").into());
    }
    check_enums(
        input.category.as_deref(),
        input.status.as_deref(),
        input.target.as_deref(),
    )?;

    let status = input.status.as_deref().unwrap_or(STATUS_DRAFT);
    let published_at = published_stamp(status, None, Utc::now());
    let message =
        PreventionMessageRepo::create(&state.pool, Some(admin.user_id), &input, published_at)
            .await?;

    tracing::info!(
        message_id = message.id,
        status = %message.status,
        author_id = admin.user_id,
        "Prevention message created",
    );
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/v1/messages/{id}
///
/// Each read counts as a view.
pub async fn get_message(
    State(state): State<AppState>,
    RequireMinistry(_admin): RequireMinistry,
    Path(id): Path<DbId>,
) -> AppResult<Json<PreventionMessage>> {
    let message = PreventionMessageRepo::record_view(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(message))
}

/// PATCH /api/v1/messages/{id}
pub async fn update_message(
    State(state): State<AppState>,
    RequireMinistry(_admin): RequireMinistry,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMessage>,
) -> AppResult<Json<PreventionMessage>> {
    check_enums(
        input.category.as_deref(),
        input.status.as_deref(),
        input.target.as_deref(),
    )?;

    let existing = PreventionMessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let status = input.status.as_deref().unwrap_or(&existing.status);
    let published_at = published_stamp(status, existing.published_at, Utc::now());

    let message = PreventionMessageRepo::update(&state.pool, id, &input, published_at)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(message))
}

/// DELETE /api/v1/messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    RequireMinistry(admin): RequireMinistry,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PreventionMessageRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(message_id = id, deleted_by = admin.user_id, "Prevention message deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/messages/{id}/publish
///
/// Idempotent: `published_at` keeps its first value.
pub async fn publish_message(
    State(state): State<AppState>,
    RequireMinistry(_admin): RequireMinistry,
    Path(id): Path<DbId>,
) -> AppResult<Json<PreventionMessage>> {
    let message = PreventionMessageRepo::publish(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(message_id = id, "Prevention message published");
    Ok(Json(message))
}
