//! Repository for the `prenatal_consultations` table.

use esante_core::pregnancy::next_numero;
use esante_core::types::DbId;
use sqlx::PgPool;

use crate::models::consultation::{Consultation, CreateConsultation, UpdateConsultation};

const COLUMNS: &str = "id, pregnancy_id, cpn_number, date, semaine, poids, tension_systolique, \
                        tension_diastolique, taille_uterine, position_bebe, battements_coeur, \
                        observations, prescriptions, medecin_id, is_completed, \
                        created_at, updated_at";

/// Provides CRUD operations for prenatal consultations.
pub struct ConsultationRepo;

impl ConsultationRepo {
    /// Insert a consultation. Without an explicit `cpn_number` the next one
    /// in sequence for the pregnancy is used.
    pub async fn create(
        pool: &PgPool,
        pregnancy_id: DbId,
        medecin_id: Option<DbId>,
        input: &CreateConsultation,
    ) -> Result<Consultation, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let cpn_number = match input.cpn_number {
            Some(n) => n,
            None => {
                // Highest rather than count: deleted visits leave gaps.
                let highest: i64 = sqlx::query_scalar(
                    "SELECT COALESCE(MAX(cpn_number), 0)::BIGINT
                     FROM prenatal_consultations WHERE pregnancy_id = $1",
                )
                .bind(pregnancy_id)
                .fetch_one(&mut *tx)
                .await?;
                next_numero(highest)
            }
        };

        let query = format!(
            "INSERT INTO prenatal_consultations
                (pregnancy_id, cpn_number, date, semaine, poids, tension_systolique,
                 tension_diastolique, taille_uterine, position_bebe, battements_coeur,
                 observations, prescriptions, medecin_id, is_completed)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, COALESCE($14, false))
             RETURNING {COLUMNS}"
        );
        let consultation = sqlx::query_as::<_, Consultation>(&query)
            .bind(pregnancy_id)
            .bind(cpn_number)
            .bind(input.date)
            .bind(input.semaine)
            .bind(input.poids)
            .bind(input.tension_systolique)
            .bind(input.tension_diastolique)
            .bind(input.taille_uterine)
            .bind(&input.position_bebe)
            .bind(input.battements_coeur)
            .bind(&input.observations)
            .bind(&input.prescriptions)
            .bind(medecin_id)
            .bind(input.is_completed)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(consultation)
    }

    /// Consultations of a pregnancy in CPN order.
    pub async fn list_for_pregnancy(
        pool: &PgPool,
        pregnancy_id: DbId,
    ) -> Result<Vec<Consultation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prenatal_consultations
             WHERE pregnancy_id = $1
             ORDER BY cpn_number"
        );
        sqlx::query_as::<_, Consultation>(&query)
            .bind(pregnancy_id)
            .fetch_all(pool)
            .await
    }

    /// Update a consultation of `pregnancy_id`. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        pregnancy_id: DbId,
        id: DbId,
        input: &UpdateConsultation,
    ) -> Result<Option<Consultation>, sqlx::Error> {
        let query = format!(
            "UPDATE prenatal_consultations SET
                date = COALESCE($3, date),
                semaine = COALESCE($4, semaine),
                poids = COALESCE($5, poids),
                tension_systolique = COALESCE($6, tension_systolique),
                tension_diastolique = COALESCE($7, tension_diastolique),
                taille_uterine = COALESCE($8, taille_uterine),
                position_bebe = COALESCE($9, position_bebe),
                battements_coeur = COALESCE($10, battements_coeur),
                observations = COALESCE($11, observations),
                prescriptions = COALESCE($12, prescriptions),
                is_completed = COALESCE($13, is_completed)
             WHERE id = $1 AND pregnancy_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Consultation>(&query)
            .bind(id)
            .bind(pregnancy_id)
            .bind(input.date)
            .bind(input.semaine)
            .bind(input.poids)
            .bind(input.tension_systolique)
            .bind(input.tension_diastolique)
            .bind(input.taille_uterine)
            .bind(&input.position_bebe)
            .bind(input.battements_coeur)
            .bind(&input.observations)
            .bind(&input.prescriptions)
            .bind(input.is_completed)
            .fetch_optional(pool)
            .await
    }

    /// Delete a consultation of `pregnancy_id`. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, pregnancy_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM prenatal_consultations WHERE id = $1 AND pregnancy_id = $2")
                .bind(id)
                .bind(pregnancy_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
