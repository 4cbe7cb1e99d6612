//! Repository for the `medical_histories` table.

use esante_core::types::DbId;
use sqlx::PgPool;

use crate::models::medical_history::{
    CreateMedicalHistory, MedicalHistory, UpdateMedicalHistory,
};

const COLUMNS: &str = "id, mother_id, type, title, date_diagnostic, details, relation, \
                        created_by, created_at, updated_at";

/// Provides CRUD operations for medical history entries.
pub struct MedicalHistoryRepo;

impl MedicalHistoryRepo {
    pub async fn create(
        pool: &PgPool,
        mother_id: DbId,
        created_by: Option<DbId>,
        input: &CreateMedicalHistory,
    ) -> Result<MedicalHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO medical_histories
                (mother_id, type, title, date_diagnostic, details, relation, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MedicalHistory>(&query)
            .bind(mother_id)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(&input.date_diagnostic)
            .bind(&input.details)
            .bind(&input.relation)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Entries of a mother, optionally of one type, newest first.
    pub async fn list_for_mother(
        pool: &PgPool,
        mother_id: DbId,
        kind: Option<&str>,
    ) -> Result<Vec<MedicalHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM medical_histories
             WHERE mother_id = $1 AND ($2::TEXT IS NULL OR type = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, MedicalHistory>(&query)
            .bind(mother_id)
            .bind(kind)
            .fetch_all(pool)
            .await
    }

    /// Update an entry owned by `mother_id`. `None` when it does not exist
    /// or belongs to someone else.
    pub async fn update(
        pool: &PgPool,
        mother_id: DbId,
        id: DbId,
        input: &UpdateMedicalHistory,
    ) -> Result<Option<MedicalHistory>, sqlx::Error> {
        let query = format!(
            "UPDATE medical_histories SET
                type = COALESCE($3, type),
                title = COALESCE($4, title),
                date_diagnostic = COALESCE($5, date_diagnostic),
                details = COALESCE($6, details),
                relation = COALESCE($7, relation)
             WHERE id = $1 AND mother_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MedicalHistory>(&query)
            .bind(id)
            .bind(mother_id)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(&input.date_diagnostic)
            .bind(&input.details)
            .bind(&input.relation)
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry owned by `mother_id`. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, mother_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM medical_histories WHERE id = $1 AND mother_id = $2")
            .bind(id)
            .bind(mother_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
