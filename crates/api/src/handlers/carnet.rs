//! Handlers for the `/carnet/{qr_code}` resource: the health booklet as
//! edited by staff after scanning a mother's card.
//!
//! Every route resolves the mother from the QR code in the path. Entries
//! scoped to a pregnancy always target the mother's current pregnancy.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use esante_core::booklet::{
    group_histories, validate_appointment_status, validate_appointment_type,
    validate_exam_type, validate_history_type, validate_sexe,
};
use esante_core::error::CoreError;
use esante_core::pregnancy::{validate_status as validate_pregnancy_status, STATUS_EN_COURS};
use esante_core::types::DbId;
use esante_db::models::appointment::{Appointment, CreateAppointment, UpdateAppointment};
use esante_db::models::birth_plan::{BirthPlan, CreateBirthPlan, UpdateBirthPlan};
use esante_db::models::child::{Child, CreateChild};
use esante_db::models::consultation::{Consultation, CreateConsultation, UpdateConsultation};
use esante_db::models::evolution::{CreateEvolution, Evolution};
use esante_db::models::exam::{CreateMedicalExam, MedicalExam, UpdateMedicalExam};
use esante_db::models::medical_history::{
    CreateMedicalHistory, MedicalHistory, UpdateMedicalHistory,
};
use esante_db::models::mother::Mother;
use esante_db::models::pregnancy::{
    CreatePregnancy, Pregnancy, PregnancyWithCounts, UpdatePregnancy,
};
use esante_db::models::spouse_info::{CreateSpouseInfo, SpouseInfo, UpdateSpouseInfo};
use esante_db::models::treatment::{CreateTreatment, Treatment};
use esante_db::models::vaccination::{CreateVaccination, UpdateVaccination, Vaccination};
use esante_db::repositories::{
    AppointmentRepo, BirthPlanRepo, ChildRepo, ConsultationRepo, EvolutionRepo, ExamRepo,
    MedicalHistoryRepo, PregnancyRepo, SpouseInfoRepo, TreatmentRepo, VaccinationRepo,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::booklet::{
    load_dossier, load_pregnancy_detail, lookup_by_code, Dossier, PregnancyDetail,
};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Shared types
// ---------------------------------------------------------------------------

/// `?type=` filter for medical history.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Medical history list, flat and grouped by type.
#[derive(Debug, Serialize)]
pub struct HistoryList {
    pub count: usize,
    pub grouped: BTreeMap<String, Vec<MedicalHistory>>,
    pub data: Vec<MedicalHistory>,
}

/// Entries of the current pregnancy.
#[derive(Debug, Serialize)]
pub struct PregnancyEntries<T: Serialize> {
    pub pregnancy_id: DbId,
    pub pregnancy_numero: i32,
    pub data: Vec<T>,
}

impl<T: Serialize> PregnancyEntries<T> {
    fn new(pregnancy: &Pregnancy, data: Vec<T>) -> Self {
        Self {
            pregnancy_id: pregnancy.id,
            pregnancy_numero: pregnancy.numero,
            data,
        }
    }
}

async fn owner(state: &AppState, code: &str) -> AppResult<Mother> {
    Ok(lookup_by_code(&state.pool, code).await?.into_mother()?)
}

async fn current(state: &AppState, code: &str) -> AppResult<Pregnancy> {
    let (_mother, pregnancy) = lookup_by_code(&state.pool, code).await?.into_current()?;
    Ok(pregnancy)
}

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// POST /api/v1/carnet/{qr_code}/scan
///
/// The complete dossier of the mother holding the card.
pub async fn scan(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(code): Path<String>,
) -> AppResult<Json<Dossier>> {
    let (mother, pregnancy) = lookup_by_code(&state.pool, &code).await?.into_parts()?;
    tracing::debug!(mother_id = mother.id, scanned_by = user.user_id, "Booklet scanned");
    Ok(Json(load_dossier(&state.pool, mother, pregnancy).await?))
}

// ---------------------------------------------------------------------------
// Pregnancies
// ---------------------------------------------------------------------------

/// GET /api/v1/carnet/{qr_code}/pregnancies
pub async fn list_pregnancies(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
) -> AppResult<Json<DataResponse<Vec<PregnancyWithCounts>>>> {
    let mother = owner(&state, &code).await?;
    let data = PregnancyRepo::list_for_mother(&state.pool, mother.id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/carnet/{qr_code}/pregnancies
///
/// The numero is assigned from the mother's pregnancy count.
pub async fn create_pregnancy(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(code): Path<String>,
    Json(input): Json<CreatePregnancy>,
) -> AppResult<(StatusCode, Json<Pregnancy>)> {
    if let Some(status) = &input.status {
        validate_pregnancy_status(status)?;
    }
    let mother = owner(&state, &code).await?;
    let pregnancy =
        PregnancyRepo::create(&state.pool, mother.id, Some(user.user_id), &input).await?;
    tracing::info!(
        mother_id = mother.id,
        pregnancy_id = pregnancy.id,
        numero = pregnancy.numero,
        "Pregnancy created",
    );
    Ok((StatusCode::CREATED, Json(pregnancy)))
}

/// GET /api/v1/carnet/{qr_code}/current-pregnancy
pub async fn get_current_pregnancy(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
) -> AppResult<Json<PregnancyDetail>> {
    let pregnancy = current(&state, &code).await?;
    Ok(Json(load_pregnancy_detail(&state.pool, pregnancy).await?))
}

/// PUT /api/v1/carnet/{qr_code}/current-pregnancy
///
/// Setting a status other than `en_cours` closes the pregnancy; it stops
/// being current.
pub async fn update_current_pregnancy(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
    Json(input): Json<UpdatePregnancy>,
) -> AppResult<Json<Pregnancy>> {
    if let Some(status) = &input.status {
        validate_pregnancy_status(status)?;
    }
    let pregnancy = current(&state, &code).await?;
    let updated = PregnancyRepo::update(&state.pool, pregnancy.id, &input)
        .await?
        .ok_or_else(|| not_found("Pregnancy", pregnancy.id))?;
    if updated.status != STATUS_EN_COURS {
        tracing::info!(pregnancy_id = updated.id, status = %updated.status, "Pregnancy closed");
    }
    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// Children
// ---------------------------------------------------------------------------

/// GET /api/v1/carnet/{qr_code}/children
pub async fn list_children(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
) -> AppResult<Json<PregnancyEntries<Child>>> {
    let pregnancy = current(&state, &code).await?;
    let children = ChildRepo::list_for_pregnancy(&state.pool, pregnancy.id).await?;
    Ok(Json(PregnancyEntries::new(&pregnancy, children)))
}

/// POST /api/v1/carnet/{qr_code}/children
pub async fn create_child(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
    Json(input): Json<CreateChild>,
) -> AppResult<(StatusCode, Json<Child>)> {
    validate_sexe(&input.sexe)?;
    if input.full_name.trim().is_empty() {
        return Err(CoreError::required("full_name").into());
    }
    let pregnancy = current(&state, &code).await?;
    let child = ChildRepo::create(&state.pool, pregnancy.id, &input).await?;
    Ok((StatusCode::CREATED, Json(child)))
}

// ---------------------------------------------------------------------------
// Medical history (mother-scoped)
// ---------------------------------------------------------------------------

/// GET /api/v1/carnet/{qr_code}/medical-history
pub async fn list_medical_history(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
    Query(params): Query<HistoryParams>,
) -> AppResult<Json<HistoryList>> {
    if let Some(kind) = &params.kind {
        validate_history_type(kind)?;
    }
    let mother = owner(&state, &code).await?;
    let data =
        MedicalHistoryRepo::list_for_mother(&state.pool, mother.id, params.kind.as_deref())
            .await?;
    Ok(Json(history_list(data)))
}

/// Wrap history rows with their per-type grouping.
pub(crate) fn history_list(data: Vec<MedicalHistory>) -> HistoryList {
    HistoryList {
        count: data.len(),
        grouped: group_histories(data.clone(), |h| h.kind.as_str()),
        data,
    }
}

/// POST /api/v1/carnet/{qr_code}/medical-history
pub async fn create_medical_history(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(code): Path<String>,
    Json(input): Json<CreateMedicalHistory>,
) -> AppResult<(StatusCode, Json<MedicalHistory>)> {
    validate_history_type(&input.kind)?;
    if input.title.trim().is_empty() {
        return Err(CoreError::required("title").into());
    }
    let mother = owner(&state, &code).await?;
    let entry =
        MedicalHistoryRepo::create(&state.pool, mother.id, Some(user.user_id), &input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/v1/carnet/{qr_code}/medical-history/{id}
pub async fn update_medical_history(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((code, id)): Path<(String, DbId)>,
    Json(input): Json<UpdateMedicalHistory>,
) -> AppResult<Json<MedicalHistory>> {
    if let Some(kind) = &input.kind {
        validate_history_type(kind)?;
    }
    let mother = owner(&state, &code).await?;
    let entry = MedicalHistoryRepo::update(&state.pool, mother.id, id, &input)
        .await?
        .ok_or_else(|| not_found("MedicalHistory", id))?;
    Ok(Json(entry))
}

/// DELETE /api/v1/carnet/{qr_code}/medical-history/{id}
pub async fn delete_medical_history(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((code, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let mother = owner(&state, &code).await?;
    if !MedicalHistoryRepo::delete(&state.pool, mother.id, id).await? {
        return Err(not_found("MedicalHistory", id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Spouse (mother-scoped singleton)
// ---------------------------------------------------------------------------

/// GET /api/v1/carnet/{qr_code}/spouse
pub async fn get_spouse(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
) -> AppResult<Json<SpouseInfo>> {
    let mother = owner(&state, &code).await?;
    let spouse = SpouseInfoRepo::find_by_mother(&state.pool, mother.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Missing("No spouse information recorded".into()))
        })?;
    Ok(Json(spouse))
}

/// POST /api/v1/carnet/{qr_code}/spouse
///
/// 409 when spouse information already exists; use PUT to change it.
pub async fn create_spouse(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
    Json(input): Json<CreateSpouseInfo>,
) -> AppResult<(StatusCode, Json<SpouseInfo>)> {
    if input.full_name.trim().is_empty() {
        return Err(CoreError::required("full_name").into());
    }
    let mother = owner(&state, &code).await?;
    if SpouseInfoRepo::find_by_mother(&state.pool, mother.id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Spouse information already exists".into(),
        )));
    }
    let spouse = SpouseInfoRepo::create(&state.pool, mother.id, &input).await?;
    Ok((StatusCode::CREATED, Json(spouse)))
}

/// PUT /api/v1/carnet/{qr_code}/spouse
pub async fn update_spouse(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
    Json(input): Json<UpdateSpouseInfo>,
) -> AppResult<Json<SpouseInfo>> {
    let mother = owner(&state, &code).await?;
    let spouse = SpouseInfoRepo::update(&state.pool, mother.id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Missing("No spouse information recorded".into()))
        })?;
    Ok(Json(spouse))
}

// ---------------------------------------------------------------------------
// Consultations
// ---------------------------------------------------------------------------

/// GET /api/v1/carnet/{qr_code}/consultations
pub async fn list_consultations(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
) -> AppResult<Json<PregnancyEntries<Consultation>>> {
    let pregnancy = current(&state, &code).await?;
    let data = ConsultationRepo::list_for_pregnancy(&state.pool, pregnancy.id).await?;
    Ok(Json(PregnancyEntries::new(&pregnancy, data)))
}

/// POST /api/v1/carnet/{qr_code}/consultations
///
/// Without an explicit `cpn_number` the next one in sequence is used.
pub async fn create_consultation(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(code): Path<String>,
    Json(input): Json<CreateConsultation>,
) -> AppResult<(StatusCode, Json<Consultation>)> {
    let pregnancy = current(&state, &code).await?;
    let consultation =
        ConsultationRepo::create(&state.pool, pregnancy.id, Some(user.user_id), &input).await?;
    tracing::info!(
        pregnancy_id = pregnancy.id,
        cpn_number = consultation.cpn_number,
        "Consultation recorded",
    );
    Ok((StatusCode::CREATED, Json(consultation)))
}

/// PUT /api/v1/carnet/{qr_code}/consultations/{id}
pub async fn update_consultation(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((code, id)): Path<(String, DbId)>,
    Json(input): Json<UpdateConsultation>,
) -> AppResult<Json<Consultation>> {
    let pregnancy = current(&state, &code).await?;
    let consultation = ConsultationRepo::update(&state.pool, pregnancy.id, id, &input)
        .await?
        .ok_or_else(|| not_found("Consultation", id))?;
    Ok(Json(consultation))
}

/// DELETE /api/v1/carnet/{qr_code}/consultations/{id}
pub async fn delete_consultation(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((code, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let pregnancy = current(&state, &code).await?;
    if !ConsultationRepo::delete(&state.pool, pregnancy.id, id).await? {
        return Err(not_found("Consultation", id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Vaccinations
// ---------------------------------------------------------------------------

/// GET /api/v1/carnet/{qr_code}/vaccinations
pub async fn list_vaccinations(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
) -> AppResult<Json<PregnancyEntries<Vaccination>>> {
    let pregnancy = current(&state, &code).await?;
    let data = VaccinationRepo::list_for_pregnancy(&state.pool, pregnancy.id).await?;
    Ok(Json(PregnancyEntries::new(&pregnancy, data)))
}

/// POST /api/v1/carnet/{qr_code}/vaccinations
pub async fn create_vaccination(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(code): Path<String>,
    Json(input): Json<CreateVaccination>,
) -> AppResult<(StatusCode, Json<Vaccination>)> {
    if input.nom.trim().is_empty() {
        return Err(CoreError::required("nom").into());
    }
    let pregnancy = current(&state, &code).await?;
    let vaccination =
        VaccinationRepo::create(&state.pool, pregnancy.id, Some(user.user_id), &input).await?;
    Ok((StatusCode::CREATED, Json(vaccination)))
}

/// PUT /api/v1/carnet/{qr_code}/vaccinations/{id}
pub async fn update_vaccination(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((code, id)): Path<(String, DbId)>,
    Json(input): Json<UpdateVaccination>,
) -> AppResult<Json<Vaccination>> {
    let pregnancy = current(&state, &code).await?;
    let vaccination = VaccinationRepo::update(&state.pool, pregnancy.id, id, &input)
        .await?
        .ok_or_else(|| not_found("Vaccination", id))?;
    Ok(Json(vaccination))
}

/// DELETE /api/v1/carnet/{qr_code}/vaccinations/{id}
pub async fn delete_vaccination(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((code, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let pregnancy = current(&state, &code).await?;
    if !VaccinationRepo::delete(&state.pool, pregnancy.id, id).await? {
        return Err(not_found("Vaccination", id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Exams
// ---------------------------------------------------------------------------

/// GET /api/v1/carnet/{qr_code}/exams
pub async fn list_exams(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
) -> AppResult<Json<PregnancyEntries<MedicalExam>>> {
    let pregnancy = current(&state, &code).await?;
    let data = ExamRepo::list_for_pregnancy(&state.pool, pregnancy.id).await?;
    Ok(Json(PregnancyEntries::new(&pregnancy, data)))
}

/// POST /api/v1/carnet/{qr_code}/exams
pub async fn create_exam(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(code): Path<String>,
    Json(input): Json<CreateMedicalExam>,
) -> AppResult<(StatusCode, Json<MedicalExam>)> {
    validate_exam_type(&input.kind)?;
    let pregnancy = current(&state, &code).await?;
    let exam = ExamRepo::create(&state.pool, pregnancy.id, Some(user.user_id), &input).await?;
    Ok((StatusCode::CREATED, Json(exam)))
}

/// PUT /api/v1/carnet/{qr_code}/exams/{id}
pub async fn update_exam(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((code, id)): Path<(String, DbId)>,
    Json(input): Json<UpdateMedicalExam>,
) -> AppResult<Json<MedicalExam>> {
    if let Some(kind) = &input.kind {
        validate_exam_type(kind)?;
    }
    let pregnancy = current(&state, &code).await?;
    let exam = ExamRepo::update(&state.pool, pregnancy.id, id, &input)
        .await?
        .ok_or_else(|| not_found("MedicalExam", id))?;
    Ok(Json(exam))
}

/// DELETE /api/v1/carnet/{qr_code}/exams/{id}
pub async fn delete_exam(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((code, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let pregnancy = current(&state, &code).await?;
    if !ExamRepo::delete(&state.pool, pregnancy.id, id).await? {
        return Err(not_found("MedicalExam", id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Treatments and evolutions (append-only)
// ---------------------------------------------------------------------------

/// GET /api/v1/carnet/{qr_code}/treatments
pub async fn list_treatments(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
) -> AppResult<Json<PregnancyEntries<Treatment>>> {
    let pregnancy = current(&state, &code).await?;
    let data = TreatmentRepo::list_for_pregnancy(&state.pool, pregnancy.id).await?;
    Ok(Json(PregnancyEntries::new(&pregnancy, data)))
}

/// POST /api/v1/carnet/{qr_code}/treatments
pub async fn create_treatment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(code): Path<String>,
    Json(input): Json<CreateTreatment>,
) -> AppResult<(StatusCode, Json<Treatment>)> {
    if input.nom.trim().is_empty() {
        return Err(CoreError::required("nom").into());
    }
    let pregnancy = current(&state, &code).await?;
    let treatment =
        TreatmentRepo::create(&state.pool, pregnancy.id, Some(user.user_id), &input).await?;
    Ok((StatusCode::CREATED, Json(treatment)))
}

/// GET /api/v1/carnet/{qr_code}/evolutions
pub async fn list_evolutions(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
) -> AppResult<Json<PregnancyEntries<Evolution>>> {
    let pregnancy = current(&state, &code).await?;
    let data = EvolutionRepo::list_for_pregnancy(&state.pool, pregnancy.id).await?;
    Ok(Json(PregnancyEntries::new(&pregnancy, data)))
}

/// POST /api/v1/carnet/{qr_code}/evolutions
pub async fn create_evolution(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(code): Path<String>,
    Json(input): Json<CreateEvolution>,
) -> AppResult<(StatusCode, Json<Evolution>)> {
    let pregnancy = current(&state, &code).await?;
    let evolution =
        EvolutionRepo::create(&state.pool, pregnancy.id, Some(user.user_id), &input).await?;
    Ok((StatusCode::CREATED, Json(evolution)))
}

// ---------------------------------------------------------------------------
// Birth plan (pregnancy-scoped singleton)
// ---------------------------------------------------------------------------

/// GET /api/v1/carnet/{qr_code}/birth-plan
pub async fn get_birth_plan(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
) -> AppResult<Json<BirthPlan>> {
    let pregnancy = current(&state, &code).await?;
    let plan = BirthPlanRepo::find_by_pregnancy(&state.pool, pregnancy.id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Missing("No birth plan recorded".into())))?;
    Ok(Json(plan))
}

/// POST /api/v1/carnet/{qr_code}/birth-plan
///
/// 409 when the current pregnancy already has a plan; use PUT to change it.
pub async fn create_birth_plan(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(code): Path<String>,
    Json(input): Json<CreateBirthPlan>,
) -> AppResult<(StatusCode, Json<BirthPlan>)> {
    let pregnancy = current(&state, &code).await?;
    if BirthPlanRepo::find_by_pregnancy(&state.pool, pregnancy.id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A birth plan already exists for this pregnancy".into(),
        )));
    }
    let plan =
        BirthPlanRepo::create(&state.pool, pregnancy.id, Some(user.user_id), &input).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// PUT /api/v1/carnet/{qr_code}/birth-plan
pub async fn update_birth_plan(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
    Json(input): Json<UpdateBirthPlan>,
) -> AppResult<Json<BirthPlan>> {
    let pregnancy = current(&state, &code).await?;
    let plan = BirthPlanRepo::update(&state.pool, pregnancy.id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Missing("No birth plan recorded".into())))?;
    Ok(Json(plan))
}

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

/// `?status=` filter for appointments.
#[derive(Debug, Deserialize)]
pub struct AppointmentParams {
    pub status: Option<String>,
}

/// GET /api/v1/carnet/{qr_code}/appointments
pub async fn list_appointments(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
    Query(params): Query<AppointmentParams>,
) -> AppResult<Json<PregnancyEntries<Appointment>>> {
    if let Some(status) = &params.status {
        validate_appointment_status(status)?;
    }
    let pregnancy = current(&state, &code).await?;
    let data =
        AppointmentRepo::list_for_pregnancy(&state.pool, pregnancy.id, params.status.as_deref())
            .await?;
    Ok(Json(PregnancyEntries::new(&pregnancy, data)))
}

/// POST /api/v1/carnet/{qr_code}/appointments
pub async fn create_appointment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(code): Path<String>,
    Json(input): Json<CreateAppointment>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    validate_appointment_type(&input.kind)?;
    if let Some(status) = &input.status {
        validate_appointment_status(status)?;
    }
    let pregnancy = current(&state, &code).await?;
    let appointment =
        AppointmentRepo::create(&state.pool, pregnancy.id, Some(user.user_id), &input).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// PUT /api/v1/carnet/{qr_code}/appointments/{id}
pub async fn update_appointment(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((code, id)): Path<(String, DbId)>,
    Json(input): Json<UpdateAppointment>,
) -> AppResult<Json<Appointment>> {
    if let Some(kind) = &input.kind {
        validate_appointment_type(kind)?;
    }
    if let Some(status) = &input.status {
        validate_appointment_status(status)?;
    }
    let pregnancy = current(&state, &code).await?;
    let appointment = AppointmentRepo::update(&state.pool, pregnancy.id, id, &input)
        .await?
        .ok_or_else(|| not_found("Appointment", id))?;
    Ok(Json(appointment))
}

/// DELETE /api/v1/carnet/{qr_code}/appointments/{id}
pub async fn delete_appointment(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((code, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let pregnancy = current(&state, &code).await?;
    if !AppointmentRepo::delete(&state.pool, pregnancy.id, id).await? {
        return Err(not_found("Appointment", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
