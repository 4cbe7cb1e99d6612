//! Booklet owner resolution and dossier assembly shared by the staff
//! booklet (`/carnet`) and the mobile gateway (`/mobile`).

use std::collections::BTreeMap;

use chrono::Utc;
use esante_core::booklet::{group_histories, BookletLookup};
use esante_core::error::CoreError;
use esante_core::pregnancy::current_week;
use esante_db::models::appointment::Appointment;
use esante_db::models::birth_plan::BirthPlan;
use esante_db::models::child::Child;
use esante_db::models::consultation::Consultation;
use esante_db::models::evolution::Evolution;
use esante_db::models::exam::MedicalExam;
use esante_db::models::health_record::HealthRecord;
use esante_db::models::medical_history::MedicalHistory;
use esante_db::models::mother::{Mother, MotherView};
use esante_db::models::pregnancy::{Pregnancy, PregnancyWithCounts};
use esante_db::models::spouse_info::SpouseInfo;
use esante_db::models::treatment::Treatment;
use esante_db::models::vaccination::Vaccination;
use esante_db::repositories::{
    AppointmentRepo, BirthPlanRepo, ChildRepo, ConsultationRepo, EvolutionRepo, ExamRepo,
    HealthRecordRepo, MedicalHistoryRepo, MotherRepo, PregnancyRepo, QrCardRepo, SpouseInfoRepo,
    TreatmentRepo, VaccinationRepo,
};
use esante_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Booklet resolution result for a mother and her current pregnancy.
pub type Lookup = BookletLookup<Mother, Pregnancy>;

/// Resolve the mother behind a QR code and her current pregnancy.
pub async fn lookup_by_code(pool: &DbPool, code: &str) -> AppResult<Lookup> {
    let Some(card) = QrCardRepo::find_by_code(pool, code.trim()).await? else {
        return Ok(Lookup::resolve(None, None, None));
    };
    let mother = MotherRepo::find_by_qr_card(pool, card.id).await?;
    let pregnancy = match &mother {
        Some(m) => PregnancyRepo::find_current(pool, m.id).await?,
        None => None,
    };
    Ok(Lookup::resolve(Some(&card.status), mother, pregnancy))
}

// ---------------------------------------------------------------------------
// Pregnancy detail
// ---------------------------------------------------------------------------

/// A pregnancy with every booklet entry recorded against it.
#[derive(Debug, Serialize)]
pub struct PregnancyDetail {
    #[serde(flatten)]
    pub pregnancy: Pregnancy,
    /// Completed weeks of amenorrhea today.
    pub current_week: Option<i64>,
    pub children: Vec<Child>,
    pub consultations: Vec<Consultation>,
    pub vaccinations: Vec<Vaccination>,
    pub exams: Vec<MedicalExam>,
    pub treatments: Vec<Treatment>,
    pub evolutions: Vec<Evolution>,
    pub birth_plan: Option<BirthPlan>,
    pub appointments: Vec<Appointment>,
}

pub async fn load_pregnancy_detail(
    pool: &DbPool,
    pregnancy: Pregnancy,
) -> AppResult<PregnancyDetail> {
    let id = pregnancy.id;
    let today = Utc::now().date_naive();
    Ok(PregnancyDetail {
        current_week: current_week(pregnancy.date_derniere_regles, today),
        children: ChildRepo::list_for_pregnancy(pool, id).await?,
        consultations: ConsultationRepo::list_for_pregnancy(pool, id).await?,
        vaccinations: VaccinationRepo::list_for_pregnancy(pool, id).await?,
        exams: ExamRepo::list_for_pregnancy(pool, id).await?,
        treatments: TreatmentRepo::list_for_pregnancy(pool, id).await?,
        evolutions: EvolutionRepo::list_for_pregnancy(pool, id).await?,
        birth_plan: BirthPlanRepo::find_by_pregnancy(pool, id).await?,
        appointments: AppointmentRepo::list_for_pregnancy(pool, id, None).await?,
        pregnancy,
    })
}

// ---------------------------------------------------------------------------
// Full dossier
// ---------------------------------------------------------------------------

/// Everything recorded about a mother.
#[derive(Debug, Serialize)]
pub struct Dossier {
    pub mother: MotherView,
    pub has_health_record: bool,
    pub health_record: Option<HealthRecord>,
    pub pregnancies: Vec<PregnancyWithCounts>,
    pub current_pregnancy: Option<PregnancyDetail>,
    pub medical_histories: BTreeMap<String, Vec<MedicalHistory>>,
    pub spouse: Option<SpouseInfo>,
}

pub async fn load_dossier(
    pool: &DbPool,
    mother: Mother,
    current: Option<Pregnancy>,
) -> AppResult<Dossier> {
    let view = MotherRepo::find_view(pool, mother.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Mother",
            id: mother.id,
        }))?;

    let health_record = HealthRecordRepo::find_by_mother(pool, mother.id).await?;
    let pregnancies = PregnancyRepo::list_for_mother(pool, mother.id).await?;
    let current_pregnancy = match current {
        Some(p) => Some(load_pregnancy_detail(pool, p).await?),
        None => None,
    };
    let histories = MedicalHistoryRepo::list_for_mother(pool, mother.id, None).await?;
    let spouse = SpouseInfoRepo::find_by_mother(pool, mother.id).await?;

    Ok(Dossier {
        mother: view,
        has_health_record: health_record.is_some(),
        health_record,
        pregnancies,
        current_pregnancy,
        medical_histories: group_histories(histories, |h| h.kind.as_str()),
        spouse,
    })
}
