//! Repository for the `medical_exams` table.

use esante_core::types::DbId;
use sqlx::PgPool;

use crate::models::exam::{CreateMedicalExam, MedicalExam, UpdateMedicalExam};

const COLUMNS: &str = "id, pregnancy_id, type, nom, date, semaine, resultats, observations, \
                        lieu_id, medecin_id, is_completed, created_at, updated_at";

/// Provides CRUD operations for medical exams.
pub struct ExamRepo;

impl ExamRepo {
    pub async fn create(
        pool: &PgPool,
        pregnancy_id: DbId,
        medecin_id: Option<DbId>,
        input: &CreateMedicalExam,
    ) -> Result<MedicalExam, sqlx::Error> {
        let query = format!(
            "INSERT INTO medical_exams
                (pregnancy_id, type, nom, date, semaine, resultats, observations, lieu_id,
                 medecin_id, is_completed)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MedicalExam>(&query)
            .bind(pregnancy_id)
            .bind(&input.kind)
            .bind(&input.nom)
            .bind(input.date)
            .bind(input.semaine)
            .bind(&input.resultats)
            .bind(&input.observations)
            .bind(input.lieu_id)
            .bind(medecin_id)
            .bind(input.is_completed)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_pregnancy(
        pool: &PgPool,
        pregnancy_id: DbId,
    ) -> Result<Vec<MedicalExam>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM medical_exams WHERE pregnancy_id = $1 ORDER BY date, id"
        );
        sqlx::query_as::<_, MedicalExam>(&query)
            .bind(pregnancy_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        pregnancy_id: DbId,
        id: DbId,
        input: &UpdateMedicalExam,
    ) -> Result<Option<MedicalExam>, sqlx::Error> {
        let query = format!(
            "UPDATE medical_exams SET
                type = COALESCE($3, type),
                nom = COALESCE($4, nom),
                date = COALESCE($5, date),
                semaine = COALESCE($6, semaine),
                resultats = COALESCE($7, resultats),
                observations = COALESCE($8, observations),
                lieu_id = COALESCE($9, lieu_id),
                is_completed = COALESCE($10, is_completed)
             WHERE id = $1 AND pregnancy_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MedicalExam>(&query)
            .bind(id)
            .bind(pregnancy_id)
            .bind(&input.kind)
            .bind(&input.nom)
            .bind(input.date)
            .bind(input.semaine)
            .bind(&input.resultats)
            .bind(&input.observations)
            .bind(input.lieu_id)
            .bind(input.is_completed)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, pregnancy_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM medical_exams WHERE id = $1 AND pregnancy_id = $2")
            .bind(id)
            .bind(pregnancy_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
