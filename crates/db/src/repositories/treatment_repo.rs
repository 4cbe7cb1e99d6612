//! Repository for the `treatments` table.

use esante_core::types::DbId;
use sqlx::PgPool;

use crate::models::treatment::{CreateTreatment, Treatment};

const COLUMNS: &str = "id, pregnancy_id, nom, dosage, frequence, date_debut, date_fin, motif, \
                        prescrit_par_id, is_active, created_at, updated_at";

/// Provides CRUD operations for treatments.
pub struct TreatmentRepo;

impl TreatmentRepo {
    pub async fn create(
        pool: &PgPool,
        pregnancy_id: DbId,
        prescrit_par_id: Option<DbId>,
        input: &CreateTreatment,
    ) -> Result<Treatment, sqlx::Error> {
        let query = format!(
            "INSERT INTO treatments
                (pregnancy_id, nom, dosage, frequence, date_debut, date_fin, motif,
                 prescrit_par_id, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Treatment>(&query)
            .bind(pregnancy_id)
            .bind(&input.nom)
            .bind(&input.dosage)
            .bind(&input.frequence)
            .bind(input.date_debut)
            .bind(input.date_fin)
            .bind(&input.motif)
            .bind(prescrit_par_id)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Treatments of a pregnancy, most recently started first.
    pub async fn list_for_pregnancy(
        pool: &PgPool,
        pregnancy_id: DbId,
    ) -> Result<Vec<Treatment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM treatments
             WHERE pregnancy_id = $1
             ORDER BY date_debut DESC, id DESC"
        );
        sqlx::query_as::<_, Treatment>(&query)
            .bind(pregnancy_id)
            .fetch_all(pool)
            .await
    }
}
