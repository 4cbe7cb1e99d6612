//! Integration tests for the card, mother and booklet repositories.
//!
//! Exercises against a real database:
//! - Card validation attaches a mother and never reverts
//! - Sequential pregnancy numbering and current-pregnancy resolution
//! - Singleton constraints (health record, spouse, birth plan)
//! - Mother directory search and filters
//! - Ownership scoping of booklet entry updates

use chrono::NaiveDate;
use esante_core::pregnancy::{STATUS_EN_COURS, STATUS_TERMINE};
use esante_core::qr::{STATUS_PENDING, STATUS_VALIDATED};
use esante_db::models::birth_plan::CreateBirthPlan;
use esante_db::models::consultation::CreateConsultation;
use esante_db::models::health_record::CreateHealthRecord;
use esante_db::models::medical_history::{CreateMedicalHistory, UpdateMedicalHistory};
use esante_db::models::mother::{Mother, MotherFilter, UpdateMother, UpsertMother};
use esante_db::models::pregnancy::{CreatePregnancy, UpdatePregnancy};
use esante_db::models::qr_card::{CreateQrCard, QrCard};
use esante_db::models::spouse_info::CreateSpouseInfo;
use esante_db::repositories::{
    BirthPlanRepo, ConsultationRepo, HealthRecordRepo, MedicalHistoryRepo, MotherRepo,
    PregnancyRepo, QrCardRepo, SpouseInfoRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn new_card(pool: &PgPool, code: &str) -> QrCard {
    QrCardRepo::create(
        pool,
        code,
        &format!("qr_codes/{code}.png"),
        &CreateQrCard::default(),
    )
    .await
    .unwrap()
}

fn mother_fields(name: &str) -> UpsertMother {
    UpsertMother {
        full_name: name.to_string(),
        address: "Quartier Plateau".to_string(),
        phone: "+22500000000".to_string(),
        birth_date: date(1995, 6, 15),
        profession: "Commercante".to_string(),
        center_id: None,
    }
}

async fn validated_mother(pool: &PgPool, code: &str, name: &str) -> Mother {
    let card = new_card(pool, code).await;
    let (_, mother) = MotherRepo::validate_card(pool, card.id, &mother_fields(name))
        .await
        .unwrap();
    mother
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

// ---------------------------------------------------------------------------
// QR cards
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_cards_start_pending(pool: PgPool) {
    let card = new_card(&pool, "QR-AAAA0001").await;
    assert_eq!(card.status, STATUS_PENDING);
    assert_eq!(card.image_path, "qr_codes/QR-AAAA0001.png");
    assert!(QrCardRepo::code_exists(&pool, "QR-AAAA0001").await.unwrap());
    assert!(!QrCardRepo::code_exists(&pool, "QR-ZZZZ9999").await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_card_code_is_rejected(pool: PgPool) {
    new_card(&pool, "QR-DUP00001").await;
    let err = QrCardRepo::create(&pool, "QR-DUP00001", "x.png", &CreateQrCard::default())
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn validation_attaches_mother_and_is_idempotent(pool: PgPool) {
    let card = new_card(&pool, "QR-VAL00001").await;

    let (validated, first) = MotherRepo::validate_card(&pool, card.id, &mother_fields("Awa Kone"))
        .await
        .unwrap();
    assert_eq!(validated.status, STATUS_VALIDATED);
    assert_eq!(first.qr_card_id, card.id);

    let (again, second) =
        MotherRepo::validate_card(&pool, card.id, &mother_fields("Awa Kone Traore"))
            .await
            .unwrap();
    assert_eq!(again.status, STATUS_VALIDATED);
    assert_eq!(second.id, first.id, "re-validation must update, not duplicate");
    assert_eq!(second.full_name, "Awa Kone Traore");

    let listed = QrCardRepo::list(&pool, Some(STATUS_VALIDATED), 20, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].mother_id, Some(first.id));
}

// ---------------------------------------------------------------------------
// Pregnancies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn pregnancies_are_numbered_sequentially(pool: PgPool) {
    let mother = validated_mother(&pool, "QR-PREG0001", "Fatou").await;

    for expected in 1..=3 {
        let p = PregnancyRepo::create(&pool, mother.id, None, &CreatePregnancy::default())
            .await
            .unwrap();
        assert_eq!(p.numero, expected);
        assert_eq!(p.status, STATUS_EN_COURS);
    }

    let listed = PregnancyRepo::list_for_mother(&pool, mother.id).await.unwrap();
    let numeros: Vec<i32> = listed.iter().map(|p| p.pregnancy.numero).collect();
    assert_eq!(numeros, vec![3, 2, 1]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn current_pregnancy_is_latest_in_progress(pool: PgPool) {
    let mother = validated_mother(&pool, "QR-CURR0001", "Mariam").await;
    assert!(PregnancyRepo::find_current(&pool, mother.id)
        .await
        .unwrap()
        .is_none());

    let first = PregnancyRepo::create(&pool, mother.id, None, &CreatePregnancy::default())
        .await
        .unwrap();
    let second = PregnancyRepo::create(&pool, mother.id, None, &CreatePregnancy::default())
        .await
        .unwrap();

    let current = PregnancyRepo::find_current(&pool, mother.id).await.unwrap().unwrap();
    assert_eq!(current.id, second.id);

    let finished = UpdatePregnancy {
        status: Some(STATUS_TERMINE.to_string()),
        ..Default::default()
    };
    PregnancyRepo::update(&pool, second.id, &finished).await.unwrap();

    let current = PregnancyRepo::find_current(&pool, mother.id).await.unwrap().unwrap();
    assert_eq!(current.id, first.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn consultations_get_next_cpn_number(pool: PgPool) {
    let mother = validated_mother(&pool, "QR-CPN00001", "Aminata").await;
    let pregnancy = PregnancyRepo::create(&pool, mother.id, None, &CreatePregnancy::default())
        .await
        .unwrap();

    let input = |n: Option<i32>| CreateConsultation {
        cpn_number: n,
        date: date(2026, 2, 1),
        semaine: Some(12),
        poids: Some(61.5),
        tension_systolique: Some(120),
        tension_diastolique: Some(80),
        taille_uterine: None,
        position_bebe: String::new(),
        battements_coeur: None,
        observations: String::new(),
        prescriptions: String::new(),
        is_completed: Some(true),
    };

    let c1 = ConsultationRepo::create(&pool, pregnancy.id, None, &input(None)).await.unwrap();
    let c2 = ConsultationRepo::create(&pool, pregnancy.id, None, &input(None)).await.unwrap();
    assert_eq!((c1.cpn_number, c2.cpn_number), (1, 2));

    let err = ConsultationRepo::create(&pool, pregnancy.id, None, &input(Some(2)))
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err));

    // A deleted visit leaves a gap; numbering continues after the highest.
    assert!(ConsultationRepo::delete(&pool, pregnancy.id, c1.id).await.unwrap());
    let c3 = ConsultationRepo::create(&pool, pregnancy.id, None, &input(None)).await.unwrap();
    assert_eq!(c3.cpn_number, 3);
}

// ---------------------------------------------------------------------------
// Singletons
// ---------------------------------------------------------------------------

fn health_record(identification_code: &str) -> CreateHealthRecord {
    CreateHealthRecord {
        father_name: "Moussa".into(),
        father_phone: String::new(),
        father_profession: String::new(),
        pere_carnet_center: String::new(),
        identification_code: identification_code.into(),
        birth_center_id: None,
        birth_center_name: "Clinique du Lac".into(),
        allocation_info: String::new(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_booklet_leaves_mother_unchanged(pool: PgPool) {
    let mother = validated_mother(&pool, "QR-OPEN0001", "Mariama").await;
    let corrections = UpdateMother {
        address: Some("Rufisque".into()),
        ..Default::default()
    };

    let (record, corrected) =
        HealthRecordRepo::open(&pool, mother.id, None, &corrections, &health_record("ID-1"))
            .await
            .unwrap();
    assert_eq!(record.mother_id, mother.id);
    assert_eq!(corrected.unwrap().address, "Rufisque");

    let late = UpdateMother {
        address: Some("Pikine".into()),
        phone: Some("770001122".into()),
        ..Default::default()
    };
    let err = HealthRecordRepo::open(&pool, mother.id, None, &late, &health_record("ID-2"))
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err));

    let stored = MotherRepo::find_by_id(&pool, mother.id).await.unwrap().unwrap();
    assert_eq!(stored.address, "Rufisque");
    assert_eq!(stored.phone, mother.phone);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn singletons_reject_second_insert(pool: PgPool) {
    let mother = validated_mother(&pool, "QR-SING0001", "Kadi").await;

    let record = health_record("ID-1");
    HealthRecordRepo::create(&pool, mother.id, None, &record).await.unwrap();
    let err = HealthRecordRepo::create(&pool, mother.id, None, &record)
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err));

    let spouse = CreateSpouseInfo {
        full_name: "Moussa".into(),
        birth_date: None,
        blood_group: "O+".into(),
        medical_history: String::new(),
        allergies: String::new(),
        phone: String::new(),
        profession: String::new(),
    };
    SpouseInfoRepo::create(&pool, mother.id, &spouse).await.unwrap();
    assert!(is_unique_violation(
        &SpouseInfoRepo::create(&pool, mother.id, &spouse).await.unwrap_err()
    ));

    let pregnancy = PregnancyRepo::create(&pool, mother.id, None, &CreatePregnancy::default())
        .await
        .unwrap();
    let plan = BirthPlanRepo::create(&pool, pregnancy.id, None, &CreateBirthPlan::default())
        .await
        .unwrap();
    assert!(plan.peau_a_peau && plan.allaitement);
    assert!(is_unique_violation(
        &BirthPlanRepo::create(&pool, pregnancy.id, None, &CreateBirthPlan::default())
            .await
            .unwrap_err()
    ));
}

// ---------------------------------------------------------------------------
// Mother directory
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_matches_name_or_code_case_insensitively(pool: PgPool) {
    validated_mother(&pool, "QR-SRCH0001", "Awa Diallo").await;
    validated_mother(&pool, "QR-SRCH0002", "Bintou Awale").await;
    validated_mother(&pool, "QR-SRCH0003", "Salimata Kone").await;

    let filter = MotherFilter {
        search: Some("awa".into()),
        ..Default::default()
    };
    let found = MotherRepo::list(&pool, &filter, 20, 0).await.unwrap();
    let mut names: Vec<&str> = found.iter().map(|m| m.mother.full_name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Awa Diallo", "Bintou Awale"]);
    assert_eq!(MotherRepo::count(&pool, &filter).await.unwrap(), 2);

    let by_code = MotherFilter {
        search: Some("srch0003".into()),
        ..Default::default()
    };
    let found = MotherRepo::list(&pool, &by_code, 20, 0).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].qr_code, "QR-SRCH0003");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_treats_wildcards_literally(pool: PgPool) {
    validated_mother(&pool, "QR-WILD0001", "Awa").await;

    let filter = MotherFilter {
        search: Some("%".into()),
        ..Default::default()
    };
    assert_eq!(MotherRepo::count(&pool, &filter).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_split_by_card_status(pool: PgPool) {
    validated_mother(&pool, "QR-STAT0001", "Awa").await;
    validated_mother(&pool, "QR-STAT0002", "Fanta").await;
    new_card(&pool, "QR-STAT0003").await;

    let stats = MotherRepo::stats(&pool).await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.validated, 2);
    assert_eq!(stats.pending, 0);

    let view = MotherRepo::recent(&pool, 20).await.unwrap();
    assert_eq!(view.len(), 2);
    assert!(!view[0].has_record);
}

// ---------------------------------------------------------------------------
// Ownership scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn history_updates_are_scoped_to_owner(pool: PgPool) {
    let awa = validated_mother(&pool, "QR-OWN00001", "Awa").await;
    let fanta = validated_mother(&pool, "QR-OWN00002", "Fanta").await;

    let entry = MedicalHistoryRepo::create(
        &pool,
        awa.id,
        None,
        &CreateMedicalHistory {
            kind: "allergie".into(),
            title: "Penicilline".into(),
            date_diagnostic: String::new(),
            details: String::new(),
            relation: String::new(),
        },
    )
    .await
    .unwrap();

    let patch = UpdateMedicalHistory {
        details: Some("Urticaire".into()),
        ..Default::default()
    };
    assert!(MedicalHistoryRepo::update(&pool, fanta.id, entry.id, &patch)
        .await
        .unwrap()
        .is_none());
    assert!(!MedicalHistoryRepo::delete(&pool, fanta.id, entry.id).await.unwrap());

    let updated = MedicalHistoryRepo::update(&pool, awa.id, entry.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.details, "Urticaire");
    assert_eq!(updated.title, "Penicilline");

    let allergies = MedicalHistoryRepo::list_for_mother(&pool, awa.id, Some("allergie"))
        .await
        .unwrap();
    assert_eq!(allergies.len(), 1);
    assert!(MedicalHistoryRepo::list_for_mother(&pool, awa.id, Some("medical"))
        .await
        .unwrap()
        .is_empty());
}
