//! Handlers for the `/mothers` resource: the mother directory and the
//! opening of a health booklet.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use esante_core::booklet::OwnerMissing;
use esante_core::error::CoreError;
use esante_core::qr::{validate_status, STATUS_VALIDATED};
use esante_core::search::{normalize_search, PageRequest, RECENT_LIMIT};
use esante_core::types::{Date, DbId};
use esante_db::models::health_record::{CreateHealthRecord, HealthRecord};
use esante_db::models::mother::{Mother, MotherFilter, MotherStats, MotherView, UpdateMother};
use esante_db::repositories::{HealthCenterRepo, HealthRecordRepo, MotherRepo, QrCardRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::qr_cards::required;
use crate::middleware::rbac::{RequireAuth, RequireHealthWorker};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /mothers`.
#[derive(Debug, Deserialize)]
pub struct MotherListParams {
    /// Card status.
    pub status: Option<String>,
    /// Health center id.
    pub center: Option<DbId>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Request body for `POST /mothers/add-record`.
#[derive(Debug, Deserialize)]
pub struct AddRecordRequest {
    pub code: Option<String>,
    pub father_name: Option<String>,
    #[serde(default)]
    pub father_phone: String,
    #[serde(default)]
    pub father_profession: String,
    pub pere_carnet_center: Option<String>,
    pub identification_code: Option<String>,
    /// Birth center name, matched against registered centers.
    #[serde(default)]
    pub mother_center_of_birth: String,
    #[serde(default)]
    pub allocation_info: String,
    // Optional corrections to the mother's identity.
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<Date>,
    pub profession: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddRecordResponse {
    pub detail: String,
    pub record: HealthRecord,
    pub mother: Mother,
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// GET /api/v1/mothers
pub async fn list_mothers(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<MotherListParams>,
) -> AppResult<Json<PageResponse<MotherView, MotherStats>>> {
    if let Some(status) = &params.status {
        validate_status(status)?;
    }
    let page = PageRequest::new(params.page, params.page_size);
    let filter = MotherFilter {
        status: params.status,
        center_id: params.center,
        search: normalize_search(params.search.as_deref()),
    };

    let mothers = MotherRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let total = MotherRepo::count(&state.pool, &filter).await?;
    let stats = MotherRepo::stats(&state.pool).await?;

    Ok(Json(PageResponse {
        data: mothers,
        pagination: page.meta(total),
        stats,
    }))
}

/// GET /api/v1/mothers/recent
pub async fn recent_mothers(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<MotherView>>>> {
    let mothers = MotherRepo::recent(&state.pool, RECENT_LIMIT).await?;
    Ok(Json(DataResponse { data: mothers }))
}

/// GET /api/v1/mothers/{id}
pub async fn get_mother(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<MotherView>> {
    let mother = MotherRepo::find_view(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Mother",
            id,
        }))?;
    Ok(Json(mother))
}

// ---------------------------------------------------------------------------
// Booklet opening
// ---------------------------------------------------------------------------

/// POST /api/v1/mothers/add-record
///
/// Open the health booklet of a mother whose card is validated.
pub async fn add_record(
    State(state): State<AppState>,
    RequireHealthWorker(worker): RequireHealthWorker,
    Json(input): Json<AddRecordRequest>,
) -> AppResult<(StatusCode, Json<AddRecordResponse>)> {
    let code = required("code", input.code)?;
    let father_name = required("father_name", input.father_name)?;
    let pere_carnet_center = required("pere_carnet_center", input.pere_carnet_center)?;
    let identification_code = required("identification_code", input.identification_code)?;

    let card = QrCardRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Missing(OwnerMissing::UnknownCode.message().into()))
        })?;
    if card.status != STATUS_VALIDATED {
        return Err(AppError::BadRequest(
            "This card is not validated yet. Validate the card first.".into(),
        ));
    }

    let mut mother = MotherRepo::find_by_qr_card(&state.pool, card.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Missing(OwnerMissing::NoMother.message().into()))
        })?;

    if HealthRecordRepo::find_by_mother(&state.pool, mother.id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A booklet already exists for this mother".into(),
        )));
    }

    let corrections = UpdateMother {
        address: non_blank(input.address),
        phone: non_blank(input.phone),
        birth_date: input.birth_date,
        profession: non_blank(input.profession),
        ..Default::default()
    };

    let birth_center_name = input.mother_center_of_birth.trim().to_string();
    let birth_center = if birth_center_name.is_empty() {
        None
    } else {
        HealthCenterRepo::find_by_name(&state.pool, &birth_center_name).await?
    };

    let (record, corrected) = HealthRecordRepo::open(
        &state.pool,
        mother.id,
        Some(worker.user_id),
        &corrections,
        &CreateHealthRecord {
            father_name,
            father_phone: input.father_phone.trim().to_string(),
            father_profession: input.father_profession.trim().to_string(),
            pere_carnet_center,
            identification_code,
            birth_center_id: birth_center.as_ref().map(|c| c.id),
            // Free text is kept only when no registered center matched.
            birth_center_name: if birth_center.is_some() {
                String::new()
            } else {
                birth_center_name
            },
            allocation_info: input.allocation_info.trim().to_string(),
        },
    )
    .await?;
    if let Some(updated) = corrected {
        mother = updated;
    }

    tracing::info!(
        record_id = record.id,
        mother_id = mother.id,
        created_by = worker.user_id,
        "Health booklet opened",
    );

    Ok((
        StatusCode::CREATED,
        Json(AddRecordResponse {
            detail: "Booklet added".into(),
            record,
            mother,
        }),
    ))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
