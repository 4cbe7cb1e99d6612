//! Repository for the `birth_plans` table.

use esante_core::types::DbId;
use sqlx::PgPool;

use crate::models::birth_plan::{BirthPlan, CreateBirthPlan, UpdateBirthPlan};

const COLUMNS: &str = "id, pregnancy_id, lieu_souhaite_id, accompagnant, preferences_douleur, \
                        positions_preferees, peau_a_peau, allaitement, notes_particulieres, \
                        created_by, created_at, updated_at";

/// Provides CRUD operations for birth plans.
pub struct BirthPlanRepo;

impl BirthPlanRepo {
    /// Insert the plan of `pregnancy_id`. A second insert violates
    /// `uq_birth_plans_pregnancy_id`.
    pub async fn create(
        pool: &PgPool,
        pregnancy_id: DbId,
        created_by: Option<DbId>,
        input: &CreateBirthPlan,
    ) -> Result<BirthPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO birth_plans
                (pregnancy_id, lieu_souhaite_id, accompagnant, preferences_douleur,
                 positions_preferees, peau_a_peau, allaitement, notes_particulieres, created_by)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, true), COALESCE($7, true), $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BirthPlan>(&query)
            .bind(pregnancy_id)
            .bind(input.lieu_souhaite_id)
            .bind(&input.accompagnant)
            .bind(&input.preferences_douleur)
            .bind(&input.positions_preferees)
            .bind(input.peau_a_peau)
            .bind(input.allaitement)
            .bind(&input.notes_particulieres)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_pregnancy(
        pool: &PgPool,
        pregnancy_id: DbId,
    ) -> Result<Option<BirthPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM birth_plans WHERE pregnancy_id = $1");
        sqlx::query_as::<_, BirthPlan>(&query)
            .bind(pregnancy_id)
            .fetch_optional(pool)
            .await
    }

    /// Update the plan of `pregnancy_id`; `None` when there is none.
    pub async fn update(
        pool: &PgPool,
        pregnancy_id: DbId,
        input: &UpdateBirthPlan,
    ) -> Result<Option<BirthPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE birth_plans SET
                lieu_souhaite_id = COALESCE($2, lieu_souhaite_id),
                accompagnant = COALESCE($3, accompagnant),
                preferences_douleur = COALESCE($4, preferences_douleur),
                positions_preferees = COALESCE($5, positions_preferees),
                peau_a_peau = COALESCE($6, peau_a_peau),
                allaitement = COALESCE($7, allaitement),
                notes_particulieres = COALESCE($8, notes_particulieres)
             WHERE pregnancy_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BirthPlan>(&query)
            .bind(pregnancy_id)
            .bind(input.lieu_souhaite_id)
            .bind(&input.accompagnant)
            .bind(&input.preferences_douleur)
            .bind(&input.positions_preferees)
            .bind(input.peau_a_peau)
            .bind(input.allaitement)
            .bind(&input.notes_particulieres)
            .fetch_optional(pool)
            .await
    }
}
