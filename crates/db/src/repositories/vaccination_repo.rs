//! Repository for the `vaccinations` table.

use esante_core::types::DbId;
use sqlx::PgPool;

use crate::models::vaccination::{CreateVaccination, UpdateVaccination, Vaccination};

const COLUMNS: &str = "id, pregnancy_id, nom, description, date, semaine, numero_lot, lieu_id, \
                        medecin_id, is_completed, created_at, updated_at";

/// Provides CRUD operations for vaccinations.
pub struct VaccinationRepo;

impl VaccinationRepo {
    pub async fn create(
        pool: &PgPool,
        pregnancy_id: DbId,
        medecin_id: Option<DbId>,
        input: &CreateVaccination,
    ) -> Result<Vaccination, sqlx::Error> {
        let query = format!(
            "INSERT INTO vaccinations
                (pregnancy_id, nom, description, date, semaine, numero_lot, lieu_id,
                 medecin_id, is_completed)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vaccination>(&query)
            .bind(pregnancy_id)
            .bind(&input.nom)
            .bind(&input.description)
            .bind(input.date)
            .bind(input.semaine)
            .bind(&input.numero_lot)
            .bind(input.lieu_id)
            .bind(medecin_id)
            .bind(input.is_completed)
            .fetch_one(pool)
            .await
    }

    /// Vaccinations of a pregnancy, oldest first.
    pub async fn list_for_pregnancy(
        pool: &PgPool,
        pregnancy_id: DbId,
    ) -> Result<Vec<Vaccination>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vaccinations WHERE pregnancy_id = $1 ORDER BY date, id"
        );
        sqlx::query_as::<_, Vaccination>(&query)
            .bind(pregnancy_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        pregnancy_id: DbId,
        id: DbId,
        input: &UpdateVaccination,
    ) -> Result<Option<Vaccination>, sqlx::Error> {
        let query = format!(
            "UPDATE vaccinations SET
                nom = COALESCE($3, nom),
                description = COALESCE($4, description),
                date = COALESCE($5, date),
                semaine = COALESCE($6, semaine),
                numero_lot = COALESCE($7, numero_lot),
                lieu_id = COALESCE($8, lieu_id),
                is_completed = COALESCE($9, is_completed)
             WHERE id = $1 AND pregnancy_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vaccination>(&query)
            .bind(id)
            .bind(pregnancy_id)
            .bind(&input.nom)
            .bind(&input.description)
            .bind(input.date)
            .bind(input.semaine)
            .bind(&input.numero_lot)
            .bind(input.lieu_id)
            .bind(input.is_completed)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, pregnancy_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vaccinations WHERE id = $1 AND pregnancy_id = $2")
            .bind(id)
            .bind(pregnancy_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
