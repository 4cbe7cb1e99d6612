//! Repository for the `pregnancies` table.

use esante_core::pregnancy::{next_numero, STATUS_EN_COURS};
use esante_core::types::DbId;
use sqlx::PgPool;

use crate::models::pregnancy::{
    CreatePregnancy, Pregnancy, PregnancyWithCounts, UpdatePregnancy,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, mother_id, numero, status, date_derniere_regles, \
                        date_accouchement_prevue, date_accouchement_reel, mode_accouchement, \
                        lieu_accouchement_id, created_by, created_at, updated_at";

/// Provides CRUD operations for pregnancies.
pub struct PregnancyRepo;

impl PregnancyRepo {
    /// Insert the next pregnancy of `mother_id`, numbered one past the
    /// number of pregnancies she already has.
    ///
    /// Two concurrent inserts race on `uq_pregnancies_mother_numero`; the
    /// loser gets a unique violation.
    pub async fn create(
        pool: &PgPool,
        mother_id: DbId,
        created_by: Option<DbId>,
        input: &CreatePregnancy,
    ) -> Result<Pregnancy, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pregnancies WHERE mother_id = $1")
                .bind(mother_id)
                .fetch_one(&mut *tx)
                .await?;

        let query = format!(
            "INSERT INTO pregnancies
                (mother_id, numero, status, date_derniere_regles, date_accouchement_prevue,
                 date_accouchement_reel, mode_accouchement, lieu_accouchement_id, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let pregnancy = sqlx::query_as::<_, Pregnancy>(&query)
            .bind(mother_id)
            .bind(next_numero(existing))
            .bind(input.status.as_deref().unwrap_or(STATUS_EN_COURS))
            .bind(input.date_derniere_regles)
            .bind(input.date_accouchement_prevue)
            .bind(input.date_accouchement_reel)
            .bind(&input.mode_accouchement)
            .bind(input.lieu_accouchement_id)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(pregnancy)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pregnancy>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pregnancies WHERE id = $1");
        sqlx::query_as::<_, Pregnancy>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The current pregnancy: highest `numero` still in progress.
    pub async fn find_current(
        pool: &PgPool,
        mother_id: DbId,
    ) -> Result<Option<Pregnancy>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pregnancies
             WHERE mother_id = $1 AND status = $2
             ORDER BY numero DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Pregnancy>(&query)
            .bind(mother_id)
            .bind(STATUS_EN_COURS)
            .fetch_optional(pool)
            .await
    }

    /// All pregnancies of a mother, most recent first, with entry counts.
    pub async fn list_for_mother(
        pool: &PgPool,
        mother_id: DbId,
    ) -> Result<Vec<PregnancyWithCounts>, sqlx::Error> {
        sqlx::query_as::<_, PregnancyWithCounts>(
            "SELECT p.id, p.mother_id, p.numero, p.status, p.date_derniere_regles,
                    p.date_accouchement_prevue, p.date_accouchement_reel, p.mode_accouchement,
                    p.lieu_accouchement_id, p.created_by, p.created_at, p.updated_at,
                    (SELECT COUNT(*) FROM children c WHERE c.pregnancy_id = p.id)
                        AS children_count,
                    (SELECT COUNT(*) FROM prenatal_consultations pc WHERE pc.pregnancy_id = p.id)
                        AS consultations_count,
                    (SELECT COUNT(*) FROM vaccinations v WHERE v.pregnancy_id = p.id)
                        AS vaccinations_count
             FROM pregnancies p
             WHERE p.mother_id = $1
             ORDER BY p.numero DESC",
        )
        .bind(mother_id)
        .fetch_all(pool)
        .await
    }

    /// Update a pregnancy. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePregnancy,
    ) -> Result<Option<Pregnancy>, sqlx::Error> {
        let query = format!(
            "UPDATE pregnancies SET
                status = COALESCE($2, status),
                date_derniere_regles = COALESCE($3, date_derniere_regles),
                date_accouchement_prevue = COALESCE($4, date_accouchement_prevue),
                date_accouchement_reel = COALESCE($5, date_accouchement_reel),
                mode_accouchement = COALESCE($6, mode_accouchement),
                lieu_accouchement_id = COALESCE($7, lieu_accouchement_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pregnancy>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(input.date_derniere_regles)
            .bind(input.date_accouchement_prevue)
            .bind(input.date_accouchement_reel)
            .bind(&input.mode_accouchement)
            .bind(input.lieu_accouchement_id)
            .fetch_optional(pool)
            .await
    }
}
