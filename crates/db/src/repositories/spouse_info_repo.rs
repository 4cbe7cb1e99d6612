//! Repository for the `spouse_infos` table.

use esante_core::types::DbId;
use sqlx::PgPool;

use crate::models::spouse_info::{CreateSpouseInfo, SpouseInfo, UpdateSpouseInfo};

const COLUMNS: &str = "id, mother_id, full_name, birth_date, blood_group, medical_history, \
                        allergies, phone, profession, created_at, updated_at";

/// Provides CRUD operations for spouse information.
pub struct SpouseInfoRepo;

impl SpouseInfoRepo {
    /// Insert the spouse of `mother_id`. A second insert violates
    /// `uq_spouse_infos_mother_id`.
    pub async fn create(
        pool: &PgPool,
        mother_id: DbId,
        input: &CreateSpouseInfo,
    ) -> Result<SpouseInfo, sqlx::Error> {
        let query = format!(
            "INSERT INTO spouse_infos
                (mother_id, full_name, birth_date, blood_group, medical_history, allergies,
                 phone, profession)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpouseInfo>(&query)
            .bind(mother_id)
            .bind(&input.full_name)
            .bind(input.birth_date)
            .bind(&input.blood_group)
            .bind(&input.medical_history)
            .bind(&input.allergies)
            .bind(&input.phone)
            .bind(&input.profession)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_mother(
        pool: &PgPool,
        mother_id: DbId,
    ) -> Result<Option<SpouseInfo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spouse_infos WHERE mother_id = $1");
        sqlx::query_as::<_, SpouseInfo>(&query)
            .bind(mother_id)
            .fetch_optional(pool)
            .await
    }

    /// Update the spouse of `mother_id`; `None` when none is recorded.
    pub async fn update(
        pool: &PgPool,
        mother_id: DbId,
        input: &UpdateSpouseInfo,
    ) -> Result<Option<SpouseInfo>, sqlx::Error> {
        let query = format!(
            "UPDATE spouse_infos SET
                full_name = COALESCE($2, full_name),
                birth_date = COALESCE($3, birth_date),
                blood_group = COALESCE($4, blood_group),
                medical_history = COALESCE($5, medical_history),
                allergies = COALESCE($6, allergies),
                phone = COALESCE($7, phone),
                profession = COALESCE($8, profession)
             WHERE mother_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpouseInfo>(&query)
            .bind(mother_id)
            .bind(&input.full_name)
            .bind(input.birth_date)
            .bind(&input.blood_group)
            .bind(&input.medical_history)
            .bind(&input.allergies)
            .bind(&input.phone)
            .bind(&input.profession)
            .fetch_optional(pool)
            .await
    }
}
