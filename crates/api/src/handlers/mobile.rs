//! Handlers for the `/mobile` resource: the mothers' app gateway.
//!
//! Read endpoints accept either a mother token or a `?qr_code=` parameter
//! (see [`MotherIdentity`]); writes require the token.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use esante_core::booklet::{is_upcoming, validate_appointment_status};
use esante_core::error::CoreError;
use esante_core::qr::CardState;
use esante_core::search::RECENT_LIMIT;
use esante_core::types::DbId;
use esante_db::models::appointment::Appointment;
use esante_db::models::consultation::Consultation;
use esante_db::models::health_record::HealthRecord;
use esante_db::models::mother::{Mother, MotherView, UpdateMother};
use esante_db::models::pregnancy::Pregnancy;
use esante_db::models::prevention_message::PreventionMessage;
use esante_db::models::session::SessionOwner;
use esante_db::models::vaccination::Vaccination;
use esante_db::repositories::{
    AppointmentRepo, ConsultationRepo, HealthRecordRepo, MedicalHistoryRepo, MotherRepo,
    PregnancyRepo, PreventionMessageRepo, QrCardRepo, VaccinationRepo,
};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_mother_token;
use crate::error::{AppError, AppResult};
use crate::handlers::auth::{create_session, TokenPair};
use crate::handlers::booklet::{
    load_dossier, load_pregnancy_detail, lookup_by_code, Dossier, PregnancyDetail,
};
use crate::handlers::carnet::{history_list, HistoryList};
use crate::handlers::qr_cards::required;
use crate::middleware::auth::{MotherAuth, MotherIdentity};
use crate::query::QrCodeParam;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct QrLoginRequest {
    pub qr_code: Option<String>,
}

/// Successful mother authentication response.
#[derive(Debug, Serialize)]
pub struct MotherAuthResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub message: String,
    pub mother: MotherView,
}

#[derive(Debug, Serialize)]
pub struct VerifyQrResponse {
    pub valid: bool,
    pub status: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_name: Option<String>,
}

/// Fields a mother may change herself.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthRecordResponse {
    pub has_record: bool,
    pub record: Option<HealthRecord>,
    pub mother: MotherView,
}

/// `?pregnancy_id=` selector; defaults to the current pregnancy.
#[derive(Debug, Deserialize)]
pub struct PregnancyParams {
    pub pregnancy_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct MobileAppointmentParams {
    pub pregnancy_id: Option<DbId>,
    pub status: Option<String>,
}

/// Entries of one pregnancy. `pregnancy_id` is null when the mother has no
/// current pregnancy and none was requested.
#[derive(Debug, Serialize)]
pub struct EntryList<T: Serialize> {
    pub count: usize,
    pub pregnancy_id: Option<DbId>,
    pub data: Vec<T>,
}

impl<T: Serialize> EntryList<T> {
    fn new(pregnancy_id: Option<DbId>, data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            pregnancy_id,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AppointmentsResponse {
    pub total: usize,
    pub upcoming_count: usize,
    /// Soonest first.
    pub upcoming: Vec<Appointment>,
    /// Most recent first.
    pub past: Vec<Appointment>,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub count: usize,
    pub messages: Vec<PreventionMessage>,
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// POST /api/v1/mobile/auth/qr-login
///
/// Exchange a scanned card code for a mother token pair. The card must be
/// validated and attached to a mother.
pub async fn qr_login(
    State(state): State<AppState>,
    Json(input): Json<QrLoginRequest>,
) -> AppResult<Json<MotherAuthResponse>> {
    let code = required("qr_code", input.qr_code)?;
    let mother = lookup_by_code(&state.pool, &code).await?.into_mother()?;

    tracing::info!(mother_id = mother.id, "Mother logged in by QR code");
    Ok(Json(issue_mother_tokens(&state, mother, &code).await?))
}

/// GET /api/v1/mobile/verify-qr?qr_code=
///
/// Tell the app whether a scanned code can be used to log in.
pub async fn verify_qr(
    State(state): State<AppState>,
    Query(params): Query<QrCodeParam>,
) -> AppResult<Json<VerifyQrResponse>> {
    let code = required("qr_code", params.qr_code)
        .map_err(|_| AppError::BadRequest("qr_code parameter is required".into()))?;

    let card = QrCardRepo::find_by_code(&state.pool, &code).await?;
    let mother = match &card {
        Some(c) => MotherRepo::find_by_qr_card(&state.pool, c.id).await?,
        None => None,
    };
    let card_state =
        CardState::classify(card.as_ref().map(|c| c.status.as_str()), mother.is_some());

    let message = match card_state {
        CardState::Unknown => "Unknown QR code",
        CardState::Pending => "This card has not been validated yet",
        CardState::NoMother => "No profile is attached to this card",
        CardState::Active => "Valid card",
    };
    Ok(Json(VerifyQrResponse {
        valid: card_state.is_usable(),
        status: card_state.as_str(),
        message,
        mother_name: mother.map(|m| m.full_name),
    }))
}

/// Sign a mother access token and persist its refresh session.
pub(crate) async fn issue_mother_tokens(
    state: &AppState,
    mother: Mother,
    qr_code: &str,
) -> AppResult<MotherAuthResponse> {
    let access_token = generate_mother_token(mother.id, qr_code, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let tokens = create_session(state, SessionOwner::Mother(mother.id), access_token).await?;
    let view = mother_view(state, &mother).await?;

    Ok(MotherAuthResponse {
        tokens,
        message: format!("Bienvenue {} !", mother.full_name),
        mother: view,
    })
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// GET /api/v1/mobile/profile
pub async fn get_profile(
    State(state): State<AppState>,
    identity: MotherIdentity,
) -> AppResult<Json<MotherView>> {
    Ok(Json(mother_view(&state, &identity.mother).await?))
}

/// PATCH /api/v1/mobile/profile
///
/// Only the phone number and address can be changed from the app.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: MotherAuth,
    Json(input): Json<ProfileUpdateRequest>,
) -> AppResult<Json<MotherView>> {
    let update = UpdateMother {
        phone: input.phone.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
        address: input.address.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
        ..Default::default()
    };
    if update.is_empty() {
        return Err(AppError::BadRequest("Nothing to update".into()));
    }

    let mother = MotherRepo::update(&state.pool, auth.mother_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Mother",
            id: auth.mother_id,
        }))?;
    tracing::info!(mother_id = mother.id, "Mother profile updated");
    Ok(Json(mother_view(&state, &mother).await?))
}

// ---------------------------------------------------------------------------
// Health booklet
// ---------------------------------------------------------------------------

/// GET /api/v1/mobile/health-record
pub async fn health_record(
    State(state): State<AppState>,
    identity: MotherIdentity,
) -> AppResult<Json<HealthRecordResponse>> {
    let record = HealthRecordRepo::find_by_mother(&state.pool, identity.mother.id).await?;
    Ok(Json(HealthRecordResponse {
        has_record: record.is_some(),
        record,
        mother: mother_view(&state, &identity.mother).await?,
    }))
}

/// GET /api/v1/mobile/full-health-record
pub async fn full_health_record(
    State(state): State<AppState>,
    identity: MotherIdentity,
) -> AppResult<Json<Dossier>> {
    let current = PregnancyRepo::find_current(&state.pool, identity.mother.id).await?;
    Ok(Json(load_dossier(&state.pool, identity.mother, current).await?))
}

/// GET /api/v1/mobile/pregnancies/{id}
pub async fn get_pregnancy(
    State(state): State<AppState>,
    identity: MotherIdentity,
    Path(id): Path<DbId>,
) -> AppResult<Json<PregnancyDetail>> {
    let pregnancy = owned_pregnancy(&state, &identity.mother, id).await?;
    Ok(Json(load_pregnancy_detail(&state.pool, pregnancy).await?))
}

/// GET /api/v1/mobile/consultations
pub async fn consultations(
    State(state): State<AppState>,
    identity: MotherIdentity,
    Query(params): Query<PregnancyParams>,
) -> AppResult<Json<EntryList<Consultation>>> {
    let Some(pregnancy) = select_pregnancy(&state, &identity.mother, params.pregnancy_id).await?
    else {
        return Ok(Json(EntryList::new(None, Vec::new())));
    };
    let data = ConsultationRepo::list_for_pregnancy(&state.pool, pregnancy.id).await?;
    Ok(Json(EntryList::new(Some(pregnancy.id), data)))
}

/// GET /api/v1/mobile/vaccinations
pub async fn vaccinations(
    State(state): State<AppState>,
    identity: MotherIdentity,
    Query(params): Query<PregnancyParams>,
) -> AppResult<Json<EntryList<Vaccination>>> {
    let Some(pregnancy) = select_pregnancy(&state, &identity.mother, params.pregnancy_id).await?
    else {
        return Ok(Json(EntryList::new(None, Vec::new())));
    };
    let data = VaccinationRepo::list_for_pregnancy(&state.pool, pregnancy.id).await?;
    Ok(Json(EntryList::new(Some(pregnancy.id), data)))
}

/// GET /api/v1/mobile/appointments
pub async fn appointments(
    State(state): State<AppState>,
    identity: MotherIdentity,
    Query(params): Query<MobileAppointmentParams>,
) -> AppResult<Json<AppointmentsResponse>> {
    if let Some(status) = &params.status {
        validate_appointment_status(status)?;
    }
    let appointments =
        match select_pregnancy(&state, &identity.mother, params.pregnancy_id).await? {
            Some(p) => {
                AppointmentRepo::list_for_pregnancy(&state.pool, p.id, params.status.as_deref())
                    .await?
            }
            None => Vec::new(),
        };
    Ok(Json(split_appointments(
        appointments,
        Utc::now().date_naive(),
    )))
}

/// GET /api/v1/mobile/medical-history
pub async fn medical_history(
    State(state): State<AppState>,
    identity: MotherIdentity,
) -> AppResult<Json<HistoryList>> {
    let data = MedicalHistoryRepo::list_for_mother(&state.pool, identity.mother.id, None).await?;
    Ok(Json(history_list(data)))
}

/// GET /api/v1/mobile/messages
///
/// Published prevention messages addressed to mothers.
pub async fn messages(
    State(state): State<AppState>,
    _identity: MotherIdentity,
) -> AppResult<Json<MessagesResponse>> {
    let messages = PreventionMessageRepo::list_for_mothers(&state.pool, RECENT_LIMIT).await?;
    Ok(Json(MessagesResponse {
        count: messages.len(),
        messages,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn mother_view(state: &AppState, mother: &Mother) -> AppResult<MotherView> {
    MotherRepo::find_view(&state.pool, mother.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Mother",
            id: mother.id,
        }))
}

/// A pregnancy that must belong to `mother`; another mother's gives 403.
async fn owned_pregnancy(state: &AppState, mother: &Mother, id: DbId) -> AppResult<Pregnancy> {
    let pregnancy = PregnancyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Pregnancy",
            id,
        }))?;
    if pregnancy.mother_id != mother.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "This pregnancy belongs to another profile".into(),
        )));
    }
    Ok(pregnancy)
}

/// The requested pregnancy, or the current one when none is requested.
async fn select_pregnancy(
    state: &AppState,
    mother: &Mother,
    requested: Option<DbId>,
) -> AppResult<Option<Pregnancy>> {
    match requested {
        Some(id) => Ok(Some(owned_pregnancy(state, mother, id).await?)),
        None => Ok(PregnancyRepo::find_current(&state.pool, mother.id).await?),
    }
}

fn split_appointments(
    appointments: Vec<Appointment>,
    today: chrono::NaiveDate,
) -> AppointmentsResponse {
    let total = appointments.len();
    let (mut upcoming, mut past): (Vec<_>, Vec<_>) = appointments
        .into_iter()
        .partition(|a| is_upcoming(a.date, today));
    upcoming.sort_by_key(|a| (a.date, a.heure));
    past.sort_by(|a, b| (b.date, b.heure).cmp(&(a.date, a.heure)));

    AppointmentsResponse {
        total,
        upcoming_count: upcoming.len(),
        upcoming,
        past,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn appointment(id: DbId, date: NaiveDate) -> Appointment {
        Appointment {
            id,
            pregnancy_id: 1,
            kind: "cpn".into(),
            title: format!("Visit {id}"),
            date,
            heure: None,
            lieu_id: None,
            medecin_id: None,
            status: "planifie".into(),
            notes: String::new(),
            rappel_envoye: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn appointments_split_around_today() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let list = vec![
            appointment(1, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()),
            appointment(2, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()),
            appointment(3, today),
            appointment(4, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()),
        ];

        let split = split_appointments(list, today);

        assert_eq!(split.total, 4);
        assert_eq!(split.upcoming_count, 2);
        let upcoming: Vec<_> = split.upcoming.iter().map(|a| a.id).collect();
        let past: Vec<_> = split.past.iter().map(|a| a.id).collect();
        assert_eq!(upcoming, vec![3, 2]);
        assert_eq!(past, vec![1, 4]);
    }
}
