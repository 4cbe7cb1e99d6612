//! Handlers for the `/qr-cards` resource: printing new cards and attaching
//! mothers to them.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use esante_core::codes::{generate_qr_code, MAX_CODE_ATTEMPTS};
use esante_core::error::CoreError;
use esante_core::qr::{image_path, render_png, validate_status};
use esante_core::search::PageRequest;
use esante_core::types::{Date, DbId};
use esante_db::models::mother::{Mother, UpsertMother};
use esante_db::models::qr_card::{CreateQrCard, QrCard, QrCardWithMother};
use esante_db::repositories::{MotherRepo, QrCardRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireHealthWorker};
use crate::response::PageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /qr-cards`.
#[derive(Debug, Deserialize)]
pub struct CardListParams {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Request body for `POST /qr-cards/validate`.
///
/// Fields are optional at the type level so a missing one is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct ValidateCardRequest {
    pub code: Option<String>,
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<Date>,
    pub profession: Option<String>,
    pub center_id: Option<DbId>,
}

/// A card as shown to staff: row, attached mother and public image URL.
#[derive(Debug, Serialize)]
pub struct CardView {
    #[serde(flatten)]
    pub card: QrCardWithMother,
    pub image_url: String,
}

/// Head counts returned with the card list.
#[derive(Debug, Serialize)]
pub struct CardStats {
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct ValidateCardResponse {
    pub detail: String,
    pub card: CardView,
    pub mother: Mother,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/qr-cards
///
/// Newest first, optionally filtered by status.
pub async fn list_cards(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<CardListParams>,
) -> AppResult<Json<PageResponse<CardView, CardStats>>> {
    if let Some(status) = &params.status {
        validate_status(status)?;
    }
    let page = PageRequest::new(params.page, params.page_size);
    let status = params.status.as_deref();

    let cards = QrCardRepo::list(&state.pool, status, page.limit(), page.offset()).await?;
    let total = QrCardRepo::count(&state.pool, status).await?;
    let all = QrCardRepo::count(&state.pool, None).await?;

    Ok(Json(PageResponse {
        data: cards.into_iter().map(|c| card_view(&state, c)).collect(),
        pagination: page.meta(total),
        stats: CardStats { total: all },
    }))
}

/// POST /api/v1/qr-cards
///
/// Generate a new pending card with a unique code and render its PNG.
pub async fn create_card(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Option<Json<CreateQrCard>>,
) -> AppResult<(StatusCode, Json<CardView>)> {
    let input = body.map(|Json(b)| b).unwrap_or_default();

    for attempt in 1..=MAX_CODE_ATTEMPTS {
        let code = generate_qr_code();
        if QrCardRepo::code_exists(&state.pool, &code).await? {
            tracing::debug!(attempt, code = %code, "QR code collision, retrying");
            continue;
        }

        let relative = image_path(&code);
        write_card_image(&state, &code, &relative).await?;

        match QrCardRepo::create(&state.pool, &code, &relative, &input).await {
            Ok(card) => {
                tracing::info!(
                    card_id = card.id,
                    code = %card.code,
                    created_by = user.user_id,
                    "QR card created",
                );
                let view = card_view(&state, without_mother(card));
                return Ok((StatusCode::CREATED, Json(view)));
            }
            Err(e) if is_unique_violation(&e) => {
                // Lost a race for the code; the image belongs to the winner.
                tracing::debug!(attempt, code = %code, "QR code taken concurrently, retrying");
                continue;
            }
            Err(e) => {
                remove_card_image(&state, &relative).await;
                return Err(e.into());
            }
        }
    }

    Err(AppError::InternalError(
        "Could not generate a unique QR code".into(),
    ))
}

/// POST /api/v1/qr-cards/validate
///
/// Attach a mother to a card. Validating an already validated card updates
/// the mother's identity fields and keeps the card validated.
pub async fn validate_card(
    State(state): State<AppState>,
    RequireHealthWorker(worker): RequireHealthWorker,
    Json(input): Json<ValidateCardRequest>,
) -> AppResult<Json<ValidateCardResponse>> {
    let code = required("code", input.code)?;
    let upsert = UpsertMother {
        full_name: required("full_name", input.full_name)?,
        address: required("address", input.address)?,
        phone: required("phone", input.phone)?,
        birth_date: input
            .birth_date
            .ok_or_else(|| CoreError::required("birth_date"))?,
        profession: required("profession", input.profession)?,
        center_id: input.center_id.or(worker.health_center_id),
    };

    let card = QrCardRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Missing("Invalid or unknown QR code".into())))?;

    let (card, mother) = MotherRepo::validate_card(&state.pool, card.id, &upsert).await?;
    tracing::info!(
        card_id = card.id,
        mother_id = mother.id,
        validated_by = worker.user_id,
        "QR card validated",
    );

    let card = QrCardWithMother {
        card,
        mother_id: Some(mother.id),
        mother_name: Some(mother.full_name.clone()),
        mother_phone: Some(mother.phone.clone()),
    };
    Ok(Json(ValidateCardResponse {
        detail: "Card validated".into(),
        card: card_view(&state, card),
        mother,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trimmed, non-blank value of a required text field.
pub(crate) fn required(field: &str, value: Option<String>) -> Result<String, CoreError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoreError::required(field))
}

fn card_view(state: &AppState, card: QrCardWithMother) -> CardView {
    CardView {
        image_url: state.config.media_url(&card.card.image_path),
        card,
    }
}

fn without_mother(card: QrCard) -> QrCardWithMother {
    QrCardWithMother {
        card,
        mother_id: None,
        mother_name: None,
        mother_phone: None,
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

async fn write_card_image(state: &AppState, code: &str, relative: &str) -> AppResult<()> {
    let png = render_png(code)?;
    let path = state.config.media_root.join(relative);
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Cannot create {}: {e}", dir.display())))?;
    }
    tokio::fs::write(&path, png)
        .await
        .map_err(|e| AppError::InternalError(format!("Cannot write {}: {e}", path.display())))
}

async fn remove_card_image(state: &AppState, relative: &str) {
    let path = state.config.media_root.join(relative);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove orphaned card image");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("phone", Some("  77 000 00 00 ".into())).unwrap(), "77 000 00 00");
        assert!(required("phone", Some("   ".into())).is_err());
        assert!(required("phone", None).is_err());
    }
}
