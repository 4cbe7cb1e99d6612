//! Repository for the `health_records` table.

use esante_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::health_record::{CreateHealthRecord, HealthRecord};
use crate::models::mother::{Mother, UpdateMother};
use crate::repositories::MotherRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, mother_id, father_name, father_phone, father_profession, \
                        pere_carnet_center, identification_code, birth_center_id, \
                        birth_center_name, allocation_info, created_by, created_at, updated_at";

/// Provides CRUD operations for health records.
pub struct HealthRecordRepo;

impl HealthRecordRepo {
    /// Insert the record of `mother_id`. A second record for the same mother
    /// violates `uq_health_records_mother_id`.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        mother_id: DbId,
        created_by: Option<DbId>,
        input: &CreateHealthRecord,
    ) -> Result<HealthRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO health_records
                (mother_id, father_name, father_phone, father_profession, pere_carnet_center,
                 identification_code, birth_center_id, birth_center_name, allocation_info,
                 created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HealthRecord>(&query)
            .bind(mother_id)
            .bind(&input.father_name)
            .bind(&input.father_phone)
            .bind(&input.father_profession)
            .bind(&input.pere_carnet_center)
            .bind(&input.identification_code)
            .bind(input.birth_center_id)
            .bind(&input.birth_center_name)
            .bind(&input.allocation_info)
            .bind(created_by)
            .fetch_one(executor)
            .await
    }

    /// Open a booklet: apply the mother's `corrections` and insert her record
    /// in one transaction, so a rejected insert leaves the mother untouched.
    ///
    /// The returned mother is `None` when there was nothing to correct.
    pub async fn open(
        pool: &PgPool,
        mother_id: DbId,
        created_by: Option<DbId>,
        corrections: &UpdateMother,
        input: &CreateHealthRecord,
    ) -> Result<(HealthRecord, Option<Mother>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mother = if corrections.is_empty() {
            None
        } else {
            MotherRepo::update(&mut *tx, mother_id, corrections).await?
        };
        let record = Self::create(&mut *tx, mother_id, created_by, input).await?;

        tx.commit().await?;
        Ok((record, mother))
    }

    pub async fn find_by_mother(
        pool: &PgPool,
        mother_id: DbId,
    ) -> Result<Option<HealthRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM health_records WHERE mother_id = $1");
        sqlx::query_as::<_, HealthRecord>(&query)
            .bind(mother_id)
            .fetch_optional(pool)
            .await
    }
}
